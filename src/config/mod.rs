//! Service configuration.
//!
//! Settings are read from a TOML file whose sections all fall back to
//! defaults, then selectively overridden from the environment:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0:8080"
//! route = "/"
//!
//! [signing]
//! public_keys = ["<64 hex characters>"]
//!
//! [listeners]
//! default_ttl_secs = 900
//! sweep_interval_secs = 30
//!
//! [directory]
//! lookup_timeout_ms = 2000
//!
//! [logging]
//! filter = "info"
//! format = "compact"
//!
//! [notifications]
//! enabled = false
//! ```

use std::fs;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signature::{SignatureError, TrustedKeys};

/// Overrides the listening address.
pub const BIND_ADDRESS_ENV: &str = "INTERCHANGE_BIND_ADDRESS";
/// Comma-delimited hex public keys replacing the configured set.
pub const PUBLIC_KEYS_ENV: &str = "INTERCHANGE_PUBLIC_KEYS";
/// Overrides the log filter expression.
pub const LOG_FILTER_ENV: &str = "INTERCHANGE_LOG_FILTER";

/// Errors raised while loading or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] Box<toml::de::Error>),

    /// A signing key is malformed.
    #[error(transparent)]
    InvalidPublicKey(#[from] SignatureError),

    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddress {
        /// Configured text.
        value: String,
        /// Parse failure.
        #[source]
        source: AddrParseError,
    },
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Request signature settings.
    pub signing: SigningConfig,
    /// Component listener lifetimes.
    pub listeners: ListenerConfig,
    /// Directory lookup settings.
    pub directory: DirectoryConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
    /// Operator notification settings.
    pub notifications: NotificationConfig,
}

impl EngineConfig {
    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|err| ConfigError::Parse(Box::new(err)))
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unset or blank variables leave the loaded values alone.
    #[must_use]
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(address) = present(BIND_ADDRESS_ENV) {
            self.server.bind_address = address.trim().to_owned();
        }
        if let Some(keys) = present(PUBLIC_KEYS_ENV) {
            self.signing.public_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(filter) = present(LOG_FILTER_ENV) {
            self.logging.filter = filter;
        }
        self
    }

    /// Parses the configured signing keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPublicKey`] for the first key that is
    /// not 64 hexadecimal characters encoding a valid point.
    pub fn trusted_keys(&self) -> Result<TrustedKeys, ConfigError> {
        TrustedKeys::from_hex(&self.signing.public_keys).map_err(ConfigError::InvalidPublicKey)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind_address: String,
    /// Path of the single interaction route.
    pub route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_owned(),
            route: "/".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] when it is not an
    /// `ip:port` pair.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: self.bind_address.clone(),
                source,
            })
    }
}

/// Request signature settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningConfig {
    /// Hex-encoded Ed25519 public keys.
    pub public_keys: Vec<String>,
}

/// Component listener lifetimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    /// Lifetime of listeners registered without one, in seconds.
    pub default_ttl_secs: u64,
    /// Period of the expiry sweep, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 900,
            sweep_interval_secs: 30,
        }
    }
}

impl ListenerConfig {
    /// Returns the default listener lifetime.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Returns the sweep period.
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Directory lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Upper bound on a single lookup, in milliseconds.
    pub lookup_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 2_000,
        }
    }
}

impl DirectoryConfig {
    /// Returns the lookup bound.
    #[must_use]
    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Single-line human-readable events.
    #[default]
    Compact,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

/// Operator notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Publish lifecycle notices.
    pub enabled: bool,
    /// Footer attached to every notice.
    pub footer: Option<String>,
}
