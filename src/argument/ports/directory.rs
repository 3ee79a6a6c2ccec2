//! External directory lookups for objects not embedded in a request.

use async_trait::async_trait;
use thiserror::Error;

use crate::interaction::{Emoji, Guild, Snowflake};

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-through lookups against the platform's object directory.
///
/// Only guilds and emoji are looked up here; members, users, channels, and
/// roles always arrive embedded in the request.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Fetches a guild by identifier.
    async fn fetch_guild(&self, guild_id: Snowflake) -> DirectoryResult<Option<Guild>>;

    /// Searches guilds whose name starts with `name`.
    async fn search_guilds_by_name(&self, name: &str) -> DirectoryResult<Vec<Guild>>;

    /// Fetches an emoji by identifier, optionally scoped to a guild.
    async fn fetch_emoji(
        &self,
        guild_id: Option<Snowflake>,
        emoji_id: Snowflake,
    ) -> DirectoryResult<Option<Emoji>>;

    /// Searches a guild's emoji whose name starts with `name`.
    async fn search_emojis_by_name(
        &self,
        guild_id: Snowflake,
        name: &str,
    ) -> DirectoryResult<Vec<Emoji>>;
}

/// Errors returned by directory adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The lookup did not complete within the configured bound.
    #[error("directory {operation} timed out after {timeout_ms}ms")]
    Timeout {
        /// Lookup that timed out.
        operation: &'static str,
        /// Configured bound in milliseconds.
        timeout_ms: u64,
    },

    /// The directory could not be reached or answered with an error.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
