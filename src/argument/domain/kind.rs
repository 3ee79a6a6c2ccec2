//! Argument type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag selecting the converter for a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    /// A bare identifier or any mention wrapping one.
    Snowflake,
    /// A guild member from the request's resolved objects.
    Member,
    /// A user from the request's resolved objects.
    User,
    /// A text channel.
    TextChannel,
    /// A guild, by identifier or by name.
    Guild,
    /// A role from the request's resolved objects.
    Role,
    /// A hexadecimal RGBA colour literal.
    Colour,
    /// A voice channel.
    VoiceChannel,
    /// A stage channel.
    StageChannel,
    /// A custom emoji, by identifier, literal, or name.
    Emoji,
    /// A custom emoji literal such as `<a:name:id>`.
    PartialEmoji,
    /// A channel category.
    CategoryChannel,
    /// A store channel.
    StoreChannel,
    /// A thread.
    Thread,
    /// Any guild channel.
    GuildChannel,
    /// Text.
    String,
    /// A boolean.
    Bool,
    /// A 64-bit signed integer.
    Int,
    /// A 64-bit float.
    Float,
    /// A list of strings, produced for component selections.
    Strings,
}

impl ArgumentType {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Snowflake,
        Self::Member,
        Self::User,
        Self::TextChannel,
        Self::Guild,
        Self::Role,
        Self::Colour,
        Self::VoiceChannel,
        Self::StageChannel,
        Self::Emoji,
        Self::PartialEmoji,
        Self::CategoryChannel,
        Self::StoreChannel,
        Self::Thread,
        Self::GuildChannel,
        Self::String,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Strings,
    ];

    /// Returns whether the tag resolves to a channel object.
    #[must_use]
    pub const fn is_channel(self) -> bool {
        matches!(
            self,
            Self::TextChannel
                | Self::VoiceChannel
                | Self::StageChannel
                | Self::CategoryChannel
                | Self::StoreChannel
                | Self::Thread
                | Self::GuildChannel
        )
    }

    /// Returns whether the tag resolves to an emoji.
    #[must_use]
    pub const fn is_emoji(self) -> bool {
        matches!(self, Self::Emoji | Self::PartialEmoji)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
