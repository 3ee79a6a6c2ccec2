//! The dispatch engine and its builder.

mod builder;
mod engine;

pub use builder::EngineBuilder;
pub use engine::Engine;
