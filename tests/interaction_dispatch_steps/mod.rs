//! Step definitions for interaction dispatch scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
