//! Detached Ed25519 verification of inbound request bodies.
//!
//! The platform signs `timestamp || body` and sends the hex-encoded signature
//! and the timestamp as headers. Verification runs on the raw bytes before
//! the body is decoded, and succeeds when any trusted key validates it.

use ed25519_dalek::{Signature, VerifyingKey};
use thiserror::Error;

/// Header carrying the hex-encoded detached signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Length in bytes of a detached signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length in bytes of a public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Errors raised while loading trusted keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// A configured key is not 64 hexadecimal characters.
    #[error("public key '{key}' must be {expected} hexadecimal characters")]
    MalformedPublicKey {
        /// The offending key text.
        key: String,
        /// Expected character count.
        expected: usize,
    },

    /// A configured key decodes but is not a valid curve point.
    #[error("public key '{0}' is not a valid Ed25519 point")]
    InvalidPublicKey(String),
}

/// The set of public keys whose signatures are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedKeys(Vec<VerifyingKey>);

impl TrustedKeys {
    /// Wraps already-parsed keys.
    #[must_use]
    pub const fn new(keys: Vec<VerifyingKey>) -> Self {
        Self(keys)
    }

    /// Parses hex-encoded keys, ignoring surrounding whitespace and empty
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] for the first key that is not 32 bytes of
    /// hex or not a valid curve point.
    pub fn from_hex<I, S>(keys: I) -> Result<Self, SignatureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter(|key| !key.as_ref().trim().is_empty())
            .map(|key| parse_public_key(key.as_ref().trim()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns whether no keys are trusted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of trusted keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the trusted keys.
    pub fn iter(&self) -> impl Iterator<Item = &VerifyingKey> {
        self.0.iter()
    }
}

fn parse_public_key(key: &str) -> Result<VerifyingKey, SignatureError> {
    let mut bytes = [0_u8; PUBLIC_KEY_LENGTH];
    hex::decode_to_slice(key, &mut bytes).map_err(|_| SignatureError::MalformedPublicKey {
        key: key.to_owned(),
        expected: PUBLIC_KEY_LENGTH * 2,
    })?;
    VerifyingKey::from_bytes(&bytes).map_err(|_| SignatureError::InvalidPublicKey(key.to_owned()))
}

/// Decodes a signature header, failing closed.
///
/// Returns `None` when the header is empty, is not hex, does not decode to
/// exactly [`SIGNATURE_LENGTH`] bytes, or has any of the three high bits of
/// the final byte set.
#[must_use]
pub fn decode_signature_header(header: &str) -> Option<Signature> {
    let mut bytes = [0_u8; SIGNATURE_LENGTH];
    hex::decode_to_slice(header.trim(), &mut bytes).ok()?;
    let canonical = bytes.last().is_some_and(|last| last & 0xE0 == 0);
    canonical.then(|| Signature::from_bytes(&bytes))
}

/// Verifies a detached signature over `timestamp || body`.
///
/// Returns `true` when any trusted key validates the signature. The check is
/// pure and never panics; every malformed input yields `false`.
#[must_use]
pub fn verify(signature_hex: &str, timestamp: &str, body: &[u8], keys: &TrustedKeys) -> bool {
    let Some(signature) = decode_signature_header(signature_hex) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    keys.iter()
        .any(|key| key.verify_strict(&message, &signature).is_ok())
}
