//! Identifier and mention patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interaction::{Emoji, Snowflake};

macro_rules! pattern {
    ($name:ident, $source:literal) => {
        #[expect(clippy::expect_used, reason = "pattern is a checked literal")]
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($source).expect(concat!("invalid pattern ", $source)));
    };
}

pattern!(ID, r"([0-9]{15,20})$");
pattern!(GENERIC_MENTION, r"<(?:@(?:!|&)?|#)([0-9]{15,20})>$");
pattern!(PARTIAL_EMOJI, r"<(a?):([a-zA-Z0-9_]{1,32}):([0-9]{15,20})>$");

fn capture_snowflake(pattern: &Regex, text: &str, group: usize) -> Option<Snowflake> {
    pattern
        .captures(text)?
        .get(group)?
        .as_str()
        .parse()
        .ok()
}

/// Extracts a trailing bare identifier.
pub(crate) fn trailing_id(text: &str) -> Option<Snowflake> {
    capture_snowflake(&ID, text, 1)
}

/// Extracts the identifier from a user, role, or channel mention.
pub(crate) fn mention_id(text: &str) -> Option<Snowflake> {
    capture_snowflake(&GENERIC_MENTION, text, 1)
}

/// Parses a custom emoji literal such as `<a:wave:123…>`.
pub(crate) fn partial_emoji(text: &str) -> Option<Emoji> {
    let captures = PARTIAL_EMOJI.captures(text)?;
    let animated = captures.get(1).is_some_and(|flag| !flag.as_str().is_empty());
    let name = captures.get(2)?.as_str();
    let id = captures.get(3)?.as_str().parse().ok()?;
    Some(Emoji::new(id, name).with_animated(animated))
}
