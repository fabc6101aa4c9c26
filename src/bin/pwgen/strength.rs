//! Rough strength estimates for generated passwords.

use serde::Serialize;

/// A deterministic stream can't carry more entropy than the seed that keys it.
const SEED_ENTROPY_BITS: f64 = 256.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Strength {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl Strength {
    pub(crate) fn from_entropy_bits(bits: f64) -> Strength {
        if bits < 50.0 {
            Strength::Weak
        } else if bits < 80.0 {
            Strength::Fair
        } else if bits < 128.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Fair => "fair",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very strong",
        }
    }
}

/// Entropy of a password of `length` characters drawn uniformly from `alphabet_len` characters.
pub(crate) fn entropy_bits(length: usize, alphabet_len: usize, deterministic: bool) -> f64 {
    let bits = length as f64 * (alphabet_len as f64).log2();
    if deterministic {
        bits.min(SEED_ENTROPY_BITS)
    } else {
        bits
    }
}
