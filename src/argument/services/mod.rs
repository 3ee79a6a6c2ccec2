//! Converters and the per-request conversion service.

mod conversion;
mod converters;
mod registry;

pub use conversion::{ArgumentConversionService, ConversionMode};
pub use converters::{
    BoolConverter, ChannelConverter, ColourConverter, ConversionInput, Converter, EmojiConverter,
    FloatConverter, GuildConverter, IntConverter, MemberConverter, PartialEmojiConverter,
    RoleConverter, SnowflakeConverter, StringConverter, StringsConverter, UserConverter,
};
pub use registry::ConverterRegistry;
