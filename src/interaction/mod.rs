//! Wire model for inbound interactions and the responses returned to the
//! platform.
//!
//! Only the fields the dispatch engine reads are modelled. Unknown fields are
//! ignored during deserialisation and unknown numeric discriminants decode
//! into `Other` variants rather than failing the request.

mod entities;
mod model;
mod response;
mod snowflake;

pub use entities::{Channel, Emoji, Guild, Member, Role, User};
pub use model::{
    DataOption, Interaction, InteractionData, InteractionType, OptionType, ResolvedData,
};
pub use response::{CallbackData, CallbackType, InteractionResponse, OptionChoice};
pub use snowflake::{Snowflake, SnowflakeParseError};

#[cfg(test)]
mod tests;
