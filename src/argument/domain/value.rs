//! Converted argument values and their type-checked accessors.

use std::collections::BTreeMap;

use super::{ArgumentAccessError, ArgumentType, Colour};
use crate::interaction::{Channel, Emoji, Guild, Member, Role, Snowflake, User};

/// The concrete value produced by a converter.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// An identifier.
    Snowflake(Snowflake),
    /// A guild member with its user attached when available.
    Member(Member),
    /// A user.
    User(User),
    /// A channel of any kind.
    Channel(Channel),
    /// A guild.
    Guild(Guild),
    /// A role.
    Role(Role),
    /// A colour.
    Colour(Colour),
    /// An emoji.
    Emoji(Emoji),
    /// Text.
    String(String),
    /// A boolean.
    Bool(bool),
    /// A 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A list of strings.
    Strings(Vec<String>),
}

/// One converted argument, tagged with the type it was declared as.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    argument_type: ArgumentType,
    value: ArgumentValue,
}

macro_rules! accessors {
    ($(
        $(#[$doc:meta])*
        $name:ident, $must:ident, $expected:literal, $tag:pat, $variant:ident, $out:ty, |$bound:ident| $map:expr;
    )*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Returns [`ArgumentAccessError::WrongType`] when the argument
            /// was declared with a different type tag.
            pub fn $name(&self) -> Result<$out, ArgumentAccessError> {
                match (self.argument_type, &self.value) {
                    ($tag, ArgumentValue::$variant($bound)) => Ok($map),
                    _ => Err(self.wrong_type($expected)),
                }
            }

            $(#[$doc])*
            ///
            /// # Panics
            ///
            /// Panics when the argument was declared with a different type
            /// tag. Prefer the non-panicking form unless the declaration is
            /// known at the call site.
            #[must_use]
            pub fn $must(&self) -> $out {
                match self.$name() {
                    Ok(value) => value,
                    Err(error) => panic!("{error}"),
                }
            }
        )*
    };
}

impl Argument {
    /// Tags a converted value.
    #[must_use]
    pub const fn new(argument_type: ArgumentType, value: ArgumentValue) -> Self {
        Self {
            argument_type,
            value,
        }
    }

    /// Returns the declared type tag.
    #[must_use]
    pub const fn argument_type(&self) -> ArgumentType {
        self.argument_type
    }

    /// Returns the untyped value.
    #[must_use]
    pub const fn value(&self) -> &ArgumentValue {
        &self.value
    }

    const fn wrong_type(&self, expected: &'static str) -> ArgumentAccessError {
        ArgumentAccessError::WrongType {
            expected,
            actual: self.argument_type,
        }
    }

    accessors! {
        /// Reads an identifier argument.
        snowflake, must_snowflake, "snowflake", ArgumentType::Snowflake, Snowflake, Snowflake, |id| *id;
        /// Reads a member argument.
        member, must_member, "member", ArgumentType::Member, Member, &Member, |member| member;
        /// Reads a user argument.
        user, must_user, "user", ArgumentType::User, User, &User, |user| user;
        /// Reads any channel-family argument.
        channel, must_channel, "channel",
            ArgumentType::TextChannel
            | ArgumentType::VoiceChannel
            | ArgumentType::StageChannel
            | ArgumentType::CategoryChannel
            | ArgumentType::StoreChannel
            | ArgumentType::Thread
            | ArgumentType::GuildChannel,
            Channel, &Channel, |channel| channel;
        /// Reads a guild argument.
        guild, must_guild, "guild", ArgumentType::Guild, Guild, &Guild, |guild| guild;
        /// Reads a role argument.
        role, must_role, "role", ArgumentType::Role, Role, &Role, |role| role;
        /// Reads a colour argument.
        colour, must_colour, "colour", ArgumentType::Colour, Colour, Colour, |colour| *colour;
        /// Reads an emoji or partial emoji argument.
        emoji, must_emoji, "emoji", ArgumentType::Emoji | ArgumentType::PartialEmoji, Emoji, &Emoji, |emoji| emoji;
        /// Reads a string argument.
        string, must_string, "string", ArgumentType::String, String, &str, |text| text.as_str();
        /// Reads a boolean argument.
        boolean, must_boolean, "bool", ArgumentType::Bool, Bool, bool, |flag| *flag;
        /// Reads an integer argument.
        int, must_int, "int", ArgumentType::Int, Int, i64, |number| *number;
        /// Reads a float argument.
        float, must_float, "float", ArgumentType::Float, Float, f64, |number| *number;
        /// Reads a string-list argument.
        strings, must_strings, "strings", ArgumentType::Strings, Strings, &[String], |values| values.as_slice();
    }
}

/// Converted arguments keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, Argument>);

impl Arguments {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts or replaces an argument.
    pub fn insert(&mut self, name: impl Into<String>, argument: Argument) {
        self.0.insert(name.into(), argument);
    }

    /// Returns the argument under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    /// Returns the argument under `name` or a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentAccessError::NotFound`] when no argument was
    /// converted under `name`.
    pub fn require(&self, name: &str) -> Result<&Argument, ArgumentAccessError> {
        self.get(name)
            .ok_or_else(|| ArgumentAccessError::NotFound(name.to_owned()))
    }

    /// Returns whether an argument exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no arguments were converted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.0.iter().map(|(name, argument)| (name.as_str(), argument))
    }
}
