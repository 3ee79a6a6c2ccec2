//! Domain model for typed arguments.

mod colour;
mod error;
mod kind;
pub(crate) mod patterns;
mod value;

pub use colour::Colour;
pub use error::{ArgumentAccessError, ArgumentError, ConversionError};
pub use kind::ArgumentType;
pub use value::{Argument, ArgumentValue, Arguments};
