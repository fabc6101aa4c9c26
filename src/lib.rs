//! Random password generation over a configurable alphabet.
//!
//! Passwords are sampled from an [`Alphabet`] using bytes from a [`ByteSource`]: either the
//! operating system's CSPRNG ([`SecureByteSource`]) or a reproducible HMAC-SHA256 stream keyed by
//! a seed ([`DeterministicByteSource`]). Sampling uses rejection, so every character of the
//! alphabet is equally likely regardless of its size.

use serde::{Deserialize, Serialize};

pub mod alphabet;
pub mod byte_source;
pub mod password_generation;

pub use alphabet::{build_alphabet, Alphabet};
pub use byte_source::{ByteSource, DeterministicByteSource, SecureByteSource};
pub use password_generation::{sample, sample_many};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("password length must be a positive integer, not {0}")]
    InvalidLength(i64),
    #[error(
        "an alphabet needs between 2 and {} distinct characters, but this one has {0}",
        alphabet::MAX_ALPHABET_LEN
    )]
    Config(usize),
    #[error(
        "a deterministic seed must be exactly {} bytes long, but {0} bytes were given",
        byte_source::SEED_LEN
    )]
    InvalidSeed(usize),
}

/// A generated password.
///
/// `Debug` doesn't reveal the contents; use [`Secret::as_str`] to get at them.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The length of the password in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
