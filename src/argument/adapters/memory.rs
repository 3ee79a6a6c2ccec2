//! In-memory directory adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::argument::ports::{DirectoryError, DirectoryLookup, DirectoryResult};
use crate::interaction::{Emoji, Guild, Snowflake};

/// In-memory directory for tests and single-process deployments.
///
/// Name searches are case-insensitive prefix matches and return results in
/// identifier order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    guilds: HashMap<Snowflake, Guild>,
    emojis: HashMap<Snowflake, Vec<Emoji>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a guild.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] when lock acquisition fails.
    pub fn insert_guild(&self, guild: Guild) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state.guilds.insert(guild.id, guild);
        Ok(())
    }

    /// Adds an emoji to a guild.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] when lock acquisition fails.
    pub fn insert_emoji(&self, guild_id: Snowflake, emoji: Emoji) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state.emojis.entry(guild_id).or_default().push(Emoji {
            guild_id: Some(guild_id),
            ..emoji
        });
        Ok(())
    }

    fn read(&self) -> DirectoryResult<std::sync::RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|err| DirectoryError::Unavailable(err.to_string()))
    }

    fn write(&self) -> DirectoryResult<std::sync::RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|err| DirectoryError::Unavailable(err.to_string()))
    }
}

fn name_matches(candidate: Option<&str>, prefix: &str) -> bool {
    candidate.is_some_and(|name| name.to_lowercase().starts_with(&prefix.to_lowercase()))
}

#[async_trait]
impl DirectoryLookup for InMemoryDirectory {
    async fn fetch_guild(&self, guild_id: Snowflake) -> DirectoryResult<Option<Guild>> {
        Ok(self.read()?.guilds.get(&guild_id).cloned())
    }

    async fn search_guilds_by_name(&self, name: &str) -> DirectoryResult<Vec<Guild>> {
        let state = self.read()?;
        let mut found: Vec<Guild> = state
            .guilds
            .values()
            .filter(|guild| name_matches(Some(&guild.name), name))
            .cloned()
            .collect();
        found.sort_by_key(|guild| guild.id);
        Ok(found)
    }

    async fn fetch_emoji(
        &self,
        guild_id: Option<Snowflake>,
        emoji_id: Snowflake,
    ) -> DirectoryResult<Option<Emoji>> {
        let state = self.read()?;
        let found = state
            .emojis
            .iter()
            .filter(|(owner, _)| guild_id.is_none_or(|scope| scope == **owner))
            .flat_map(|(_, emojis)| emojis.iter())
            .find(|emoji| emoji.id == Some(emoji_id))
            .cloned();
        Ok(found)
    }

    async fn search_emojis_by_name(
        &self,
        guild_id: Snowflake,
        name: &str,
    ) -> DirectoryResult<Vec<Emoji>> {
        let state = self.read()?;
        let mut found: Vec<Emoji> = state
            .emojis
            .get(&guild_id)
            .into_iter()
            .flatten()
            .filter(|emoji| name_matches(emoji.name.as_deref(), name))
            .cloned()
            .collect();
        found.sort_by_key(|emoji| emoji.id);
        Ok(found)
    }
}
