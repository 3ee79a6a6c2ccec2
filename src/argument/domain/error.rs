//! Error types for argument conversion and access.

use thiserror::Error;

use super::ArgumentType;
use crate::argument::ports::DirectoryError;

/// Failure converting one raw option into a typed argument.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// No converter is registered for the parameter's type tag.
    #[error("no converter is registered for argument type {0}")]
    ConverterNotFound(ArgumentType),

    /// A required parameter was not supplied.
    #[error("missing required argument")]
    MissingRequiredArgument,

    /// No identifier or mention could be found in the value.
    #[error("no identifier was found in the value")]
    SnowflakeNotFound,

    /// The member is not among the request's resolved objects.
    #[error("member was not found")]
    MemberNotFound,

    /// The user is not among the request's resolved objects.
    #[error("user was not found")]
    UserNotFound,

    /// The channel is not among the request's resolved objects.
    #[error("channel was not found")]
    ChannelNotFound,

    /// The role is not among the request's resolved objects.
    #[error("role was not found")]
    RoleNotFound,

    /// No guild matched the identifier or name.
    #[error("guild was not found")]
    GuildNotFound,

    /// No emoji matched the value.
    #[error("emoji was not found")]
    EmojiNotFound,

    /// The value is not a hexadecimal colour literal.
    #[error("colour must be hexadecimal, optionally prefixed with '#' or '0x'")]
    BadColour,

    /// The value is not a 64-bit integer.
    #[error("value is not a valid integer")]
    BadInt,

    /// The value is not a 64-bit float.
    #[error("value is not a valid number")]
    BadFloat,

    /// The value is not a boolean.
    #[error("value is not a valid boolean")]
    BadBool,

    /// The wire value had the wrong JSON shape.
    #[error("expected a {expected} value")]
    MalformedValue {
        /// Description of the expected shape.
        expected: &'static str,
    },

    /// The value falls outside the declared constraints.
    #[error("{reason}")]
    ConstraintViolation {
        /// Human-readable reason.
        reason: String,
    },

    /// The external directory failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// A conversion failure attributed to a named parameter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("argument '{parameter}': {source}")]
pub struct ArgumentError {
    /// Parameter name.
    pub parameter: String,
    /// Underlying failure.
    #[source]
    pub source: ConversionError,
}

impl ArgumentError {
    /// Attributes a conversion failure to a parameter.
    #[must_use]
    pub fn new(parameter: impl Into<String>, source: ConversionError) -> Self {
        Self {
            parameter: parameter.into(),
            source,
        }
    }
}

/// Failure reading a converted argument.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentAccessError {
    /// No argument exists under the name.
    #[error("argument '{0}' was not supplied")]
    NotFound(String),

    /// The accessor does not match the argument's type tag.
    #[error("argument of type {actual} cannot be read as {expected}")]
    WrongType {
        /// What the accessor reads.
        expected: &'static str,
        /// The argument's type tag.
        actual: ArgumentType,
    },
}
