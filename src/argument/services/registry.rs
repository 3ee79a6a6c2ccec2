//! Lookup table from argument type to converter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::converters::{
    BoolConverter, ChannelConverter, ColourConverter, Converter, EmojiConverter, FloatConverter,
    GuildConverter, IntConverter, MemberConverter, PartialEmojiConverter, RoleConverter,
    SnowflakeConverter, StringConverter, StringsConverter, UserConverter,
};
use crate::argument::domain::ArgumentType;

/// Maps each argument type to its converter.
///
/// The registry is populated before the engine is built and read without
/// locking afterwards. Registering a type again replaces its converter.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<ArgumentType, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding a converter for every built-in type.
    #[must_use]
    pub fn builtin() -> Self {
        let channel: Arc<dyn Converter> = Arc::new(ChannelConverter);
        let mut registry = Self::new()
            .with_converter(ArgumentType::Snowflake, SnowflakeConverter)
            .with_converter(ArgumentType::Member, MemberConverter)
            .with_converter(ArgumentType::User, UserConverter)
            .with_converter(ArgumentType::Guild, GuildConverter)
            .with_converter(ArgumentType::Role, RoleConverter)
            .with_converter(ArgumentType::Colour, ColourConverter)
            .with_converter(ArgumentType::Emoji, EmojiConverter)
            .with_converter(ArgumentType::PartialEmoji, PartialEmojiConverter)
            .with_converter(ArgumentType::String, StringConverter)
            .with_converter(ArgumentType::Bool, BoolConverter)
            .with_converter(ArgumentType::Int, IntConverter)
            .with_converter(ArgumentType::Float, FloatConverter)
            .with_converter(ArgumentType::Strings, StringsConverter);
        for argument_type in ArgumentType::ALL.into_iter().filter(|tag| tag.is_channel()) {
            registry
                .converters
                .insert(argument_type, Arc::clone(&channel));
        }
        registry
    }

    /// Registers a converter, replacing any existing one for the type.
    #[must_use]
    pub fn with_converter(
        mut self,
        argument_type: ArgumentType,
        converter: impl Converter + 'static,
    ) -> Self {
        self.register(argument_type, converter);
        self
    }

    /// Registers a converter in place.
    pub fn register(&mut self, argument_type: ArgumentType, converter: impl Converter + 'static) {
        self.converters.insert(argument_type, Arc::new(converter));
    }

    /// Returns the converter for a type.
    #[must_use]
    pub fn get(&self, argument_type: ArgumentType) -> Option<&Arc<dyn Converter>> {
        self.converters.get(&argument_type)
    }

    /// Returns whether a converter is registered for a type.
    #[must_use]
    pub fn contains(&self, argument_type: ArgumentType) -> bool {
        self.converters.contains_key(&argument_type)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<_> = self.converters.keys().copied().collect();
        registered.sort();
        f.debug_struct("ConverterRegistry")
            .field("registered", &registered)
            .finish()
    }
}
