//! Typed argument conversion.
//!
//! Each declared parameter of a resolved command is converted from its raw
//! wire value into a typed [`domain::Argument`] by the converter registered
//! for its [`domain::ArgumentType`]. The module follows the hexagonal layout
//! used across the crate:
//!
//! - Domain types in [`domain`]
//! - The directory lookup port in [`ports`]
//! - In-memory adapters in [`adapters`]
//! - Converters and the conversion service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
