//! Built-in converters, one per argument type family.

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::argument::domain::{ArgumentValue, Colour, ConversionError, patterns};
use crate::argument::ports::{DirectoryError, DirectoryLookup, DirectoryResult};
use crate::interaction::{DataOption, Emoji, Interaction, ResolvedData, Snowflake};

/// Everything a converter may read while converting one option.
pub struct ConversionInput<'a> {
    /// The request being processed.
    pub interaction: &'a Interaction,
    /// The option carrying the raw value.
    pub option: &'a DataOption,
    /// The raw wire value.
    pub raw: &'a Value,
    /// Fallback lookups for objects not embedded in the request.
    pub directory: &'a dyn DirectoryLookup,
    /// Bound applied to each directory lookup.
    pub lookup_timeout: Duration,
}

impl ConversionInput<'_> {
    /// Returns the raw value as text.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MalformedValue`] when the wire value is not
    /// a JSON string.
    pub fn raw_str(&self) -> Result<&str, ConversionError> {
        self.raw
            .as_str()
            .ok_or(ConversionError::MalformedValue { expected: "string" })
    }

    fn resolved(&self) -> Option<&ResolvedData> {
        self.interaction.resolved()
    }

    fn referenced_id(&self) -> Result<Option<Snowflake>, ConversionError> {
        Ok(self.raw_str()?.trim().parse().ok())
    }

    /// Runs a directory lookup within the configured bound.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Timeout`] when the bound elapses, or the
    /// lookup's own error.
    pub async fn lookup<T>(
        &self,
        operation: &'static str,
        lookup: impl Future<Output = DirectoryResult<T>> + Send,
    ) -> Result<T, ConversionError> {
        let outcome = tokio::time::timeout(self.lookup_timeout, lookup)
            .await
            .map_err(|_| DirectoryError::Timeout {
                operation,
                timeout_ms: u64::try_from(self.lookup_timeout.as_millis()).unwrap_or(u64::MAX),
            })?;
        Ok(outcome?)
    }
}

/// Converts one raw option value into a typed value.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Performs the conversion.
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError>;
}

/// Identifier from a bare ID or any mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeConverter;

#[async_trait]
impl Converter for SnowflakeConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let text = input.raw_str()?;
        patterns::trailing_id(text)
            .or_else(|| patterns::mention_id(text))
            .map(ArgumentValue::Snowflake)
            .ok_or(ConversionError::SnowflakeNotFound)
    }
}

/// Guild member from the resolved objects, with its user attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberConverter;

#[async_trait]
impl Converter for MemberConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let id = input.referenced_id()?.ok_or(ConversionError::MemberNotFound)?;
        let resolved = input.resolved().ok_or(ConversionError::MemberNotFound)?;
        let mut member = resolved
            .members
            .get(&id)
            .cloned()
            .ok_or(ConversionError::MemberNotFound)?;
        match resolved.users.get(&id) {
            Some(user) => member.user = Some(user.clone()),
            None => tracing::warn!(id = %id, "resolved member has no matching resolved user"),
        }
        Ok(ArgumentValue::Member(member))
    }
}

/// User from the resolved objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserConverter;

#[async_trait]
impl Converter for UserConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let id = input.referenced_id()?.ok_or(ConversionError::UserNotFound)?;
        input
            .resolved()
            .and_then(|resolved| resolved.users.get(&id))
            .cloned()
            .map(ArgumentValue::User)
            .ok_or(ConversionError::UserNotFound)
    }
}

/// Channel of any kind from the resolved objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelConverter;

#[async_trait]
impl Converter for ChannelConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let id = input.referenced_id()?.ok_or(ConversionError::ChannelNotFound)?;
        input
            .resolved()
            .and_then(|resolved| resolved.channels.get(&id))
            .cloned()
            .map(ArgumentValue::Channel)
            .ok_or(ConversionError::ChannelNotFound)
    }
}

/// Role from the resolved objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleConverter;

#[async_trait]
impl Converter for RoleConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let id = input.referenced_id()?.ok_or(ConversionError::RoleNotFound)?;
        input
            .resolved()
            .and_then(|resolved| resolved.roles.get(&id))
            .cloned()
            .map(ArgumentValue::Role)
            .ok_or(ConversionError::RoleNotFound)
    }
}

/// Guild fetched by trailing identifier, else searched by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildConverter;

#[async_trait]
impl Converter for GuildConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let text = input.raw_str()?;
        let guild = match patterns::trailing_id(text) {
            Some(id) => {
                input
                    .lookup("guild fetch", input.directory.fetch_guild(id))
                    .await?
            }
            None => input
                .lookup("guild search", input.directory.search_guilds_by_name(text))
                .await?
                .into_iter()
                .next(),
        };
        guild
            .map(ArgumentValue::Guild)
            .ok_or(ConversionError::GuildNotFound)
    }
}

/// Hexadecimal RGBA colour literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColourConverter;

#[async_trait]
impl Converter for ColourConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        Colour::parse(input.raw_str()?)
            .map(ArgumentValue::Colour)
            .ok_or(ConversionError::BadColour)
    }
}

/// Emoji by identifier, custom literal, or name within the request's guild.
///
/// An identifier the directory does not know still yields an emoji carrying
/// only that identifier; an unknown custom literal yields the parsed literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiConverter;

#[async_trait]
impl Converter for EmojiConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let text = input.raw_str()?;
        let guild_id = input.interaction.guild_id;

        if let Some(id) = patterns::trailing_id(text) {
            let fetched = input
                .lookup("emoji fetch", input.directory.fetch_emoji(guild_id, id))
                .await?;
            let emoji = fetched.unwrap_or_else(|| Emoji {
                id: Some(id),
                guild_id,
                ..Emoji::default()
            });
            return Ok(ArgumentValue::Emoji(emoji));
        }

        if let Some(literal) = patterns::partial_emoji(text) {
            let Some(id) = literal.id else {
                return Ok(ArgumentValue::Emoji(literal));
            };
            let fetched = input
                .lookup("emoji fetch", input.directory.fetch_emoji(guild_id, id))
                .await?;
            return Ok(ArgumentValue::Emoji(fetched.unwrap_or(literal)));
        }

        let Some(guild) = guild_id else {
            return Err(ConversionError::EmojiNotFound);
        };
        input
            .lookup(
                "emoji search",
                input.directory.search_emojis_by_name(guild, text),
            )
            .await?
            .into_iter()
            .next()
            .map(ArgumentValue::Emoji)
            .ok_or(ConversionError::EmojiNotFound)
    }
}

/// Custom emoji literal only; never consults the directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialEmojiConverter;

#[async_trait]
impl Converter for PartialEmojiConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        patterns::partial_emoji(input.raw_str()?)
            .map(ArgumentValue::Emoji)
            .ok_or(ConversionError::EmojiNotFound)
    }
}

/// Text, passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

#[async_trait]
impl Converter for StringConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        Ok(ArgumentValue::String(input.raw_str()?.to_owned()))
    }
}

/// JSON boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

#[async_trait]
impl Converter for BoolConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        input
            .raw
            .as_bool()
            .map(ArgumentValue::Bool)
            .ok_or(ConversionError::BadBool)
    }
}

/// JSON integer within the signed 64-bit range.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntConverter;

#[async_trait]
impl Converter for IntConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        input
            .raw
            .as_i64()
            .map(ArgumentValue::Int)
            .ok_or(ConversionError::BadInt)
    }
}

/// JSON number, or a string holding one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatConverter;

#[async_trait]
impl Converter for FloatConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        let parsed = match input.raw {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|value| value.is_finite())
            .map(ArgumentValue::Float)
            .ok_or(ConversionError::BadFloat)
    }
}

/// JSON array of strings, or a single string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringsConverter;

#[async_trait]
impl Converter for StringsConverter {
    async fn convert(&self, input: &ConversionInput<'_>) -> Result<ArgumentValue, ConversionError> {
        match input.raw {
            Value::String(text) => Ok(ArgumentValue::Strings(vec![text.clone()])),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(ArgumentValue::Strings)
                .ok_or(ConversionError::MalformedValue {
                    expected: "list of strings",
                }),
            _ => Err(ConversionError::MalformedValue {
                expected: "list of strings",
            }),
        }
    }
}
