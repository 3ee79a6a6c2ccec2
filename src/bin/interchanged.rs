//! Serves signed interaction webhooks.
//!
//! Usage:
//!
//! ```text
//! interchanged [config-path] [--dry-run]
//! ```
//!
//! The configuration path may also be given through `INTERCHANGE_CONFIG`;
//! without either, built-in defaults apply. `--dry-run` validates the
//! configuration and the command registrations, then exits without binding.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tokio::sync::watch;

use interchange::cog::PingCog;
use interchange::config::{ConfigError, EngineConfig};
use interchange::dispatch::{Engine, EngineBuildError, EngineBuilder};
use interchange::http::{self, AppState};
use interchange::listener::spawn_sweeper;
use interchange::notify::{
    Notification, NotificationLevel, NotificationSink, TracingNotificationSink,
};
use interchange::telemetry::{self, TelemetryError};

/// Names the configuration file when no path argument is given.
const CONFIG_ENV: &str = "INTERCHANGE_CONFIG";
const DRY_RUN_FLAG: &str = "--dry-run";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Build(#[from] EngineBuildError),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Invocation {
    config_path: Option<PathBuf>,
    dry_run: bool,
}

fn main() -> Result<(), BoxError> {
    let invocation = parse_args(env::args().skip(1), |name| env::var(name).ok())?;
    let config = load_config(&invocation)?;
    telemetry::initialise(&config.logging).map_err(StartupError::from)?;
    let engine = build_engine(&config)?;

    if invocation.dry_run {
        config.trusted_keys().map_err(StartupError::from)?;
        config.server.socket_address().map_err(StartupError::from)?;
        tracing::info!(
            commands = engine.tree().len(),
            cogs = engine.cogs().count(),
            "configuration is valid"
        );
        return Ok(());
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::from)?;
    runtime.block_on(run(config, engine)).map_err(Into::into)
}

fn parse_args(
    args: impl Iterator<Item = String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Invocation, StartupError> {
    let mut invocation = Invocation::default();
    for arg in args {
        if arg == DRY_RUN_FLAG {
            invocation.dry_run = true;
        } else if arg.starts_with("--") {
            return Err(StartupError::InvalidArgs(format!("unknown flag: {arg}")));
        } else if invocation.config_path.is_some() {
            return Err(StartupError::InvalidArgs(format!(
                "unexpected extra argument: {arg}"
            )));
        } else {
            invocation.config_path = Some(PathBuf::from(arg));
        }
    }
    if invocation.config_path.is_none() {
        invocation.config_path = lookup(CONFIG_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
    }
    Ok(invocation)
}

fn load_config(invocation: &Invocation) -> Result<EngineConfig, StartupError> {
    let loaded = match &invocation.config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    Ok(loaded.apply_env(|name| env::var(name).ok()))
}

fn build_engine(config: &EngineConfig) -> Result<Engine, StartupError> {
    let mut builder = EngineBuilder::from_config(config);
    builder
        .register_cog(PingCog)
        .map_err(EngineBuildError::from)?;
    Ok(builder.build()?)
}

async fn run(config: EngineConfig, built: Engine) -> Result<(), StartupError> {
    let keys = config.trusted_keys()?;
    if keys.is_empty() {
        tracing::warn!("no signing keys configured; every request will be rejected");
    }
    let address = config.server.socket_address()?;
    let engine = Arc::new(built);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = spawn_sweeper(
        Arc::clone(engine.listeners()),
        config.listeners.sweep_interval(),
        shutdown_rx.clone(),
    );
    let listener = TcpListener::bind(address).await?;
    let router = http::router(
        AppState::new(Arc::clone(&engine), keys),
        &config.server.route,
    );
    let server = tokio::spawn(http::serve(listener, router, shutdown_rx));
    announce(
        &config,
        NotificationLevel::Info,
        "Starting",
        format!("listening on {address}"),
    )
    .await;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    if shutdown_tx.send(true).is_err() {
        tracing::debug!("server and sweeper already stopped");
    }
    server.await??;
    sweeper.await?;

    let failures = engine.shutdown().await;
    let level = if failures.is_empty() {
        NotificationLevel::Info
    } else {
        NotificationLevel::Warning
    };
    announce(
        &config,
        level,
        "Stopped",
        format!("{} cog unload failures", failures.len()),
    )
    .await;
    Ok(())
}

async fn announce(
    config: &EngineConfig,
    level: NotificationLevel,
    title: &str,
    description: String,
) {
    if !config.notifications.enabled {
        return;
    }
    let mut notice = Notification::new(title, description, level, Utc::now());
    if let Some(footer) = &config.notifications.footer {
        notice = notice.with_footer(footer.as_str());
    }
    if let Err(error) = TracingNotificationSink.publish(&notice).await {
        tracing::warn!(%error, "failed to publish notification");
    }
}
