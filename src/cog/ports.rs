//! The cog plugin trait.

use async_trait::async_trait;

use super::{CogCommands, CogHooks, CogInfo};
use crate::dispatch::HandlerResult;

/// A plugin bundling related commands and lifecycle hooks.
///
/// Only the hooks declared by [`Self::hooks`] are called.
#[async_trait]
pub trait Cog: Send + Sync {
    /// Returns the cog's name and description.
    fn info(&self) -> CogInfo;

    /// Declares which optional hooks the cog supplies.
    fn hooks(&self) -> CogHooks {
        CogHooks::none()
    }

    /// Runs once when the cog is registered.
    ///
    /// # Errors
    ///
    /// An error aborts registration with [`super::CogError::Load`].
    fn load(&self) -> HandlerResult<()> {
        Ok(())
    }

    /// Runs when the engine shuts down.
    ///
    /// # Errors
    ///
    /// An error is logged; other cogs still unload.
    async fn unload(&self) -> HandlerResult<()> {
        Ok(())
    }

    /// Returns the commands to register at the root.
    fn commands(&self) -> CogCommands {
        CogCommands::new()
    }
}
