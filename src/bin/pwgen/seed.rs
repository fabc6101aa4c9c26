//! Getting a seed for deterministic generation from the user.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::ProgError;

/// Where the seed for deterministic mode comes from.
pub(crate) enum SeedInput<'a> {
    Hex(&'a str),
    File(&'a Path),
    Prompt,
}

/// A 32-byte seed decoded from hex. `Debug` doesn't print it.
pub(crate) struct Seed(Vec<u8>);

opaque_debug::implement!(Seed);

impl Seed {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

pub(crate) fn read_seed(input: SeedInput<'_>) -> Result<Seed, ProgError> {
    match input {
        SeedInput::Hex(hex) => decode_seed(hex),
        SeedInput::File(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file {}", path.display()))?;
            decode_seed(&contents)
        }
        SeedInput::Prompt => {
            let hex = rpassword::prompt_password("Seed (64 hex characters): ")
                .context("failed to read seed from TTY")?;
            decode_seed(&hex)
        }
    }
}

/// Decode a seed given as exactly 64 hex digits. Surrounding whitespace is ignored.
pub(crate) fn decode_seed(hex: &str) -> Result<Seed, ProgError> {
    let bytes = hex::decode(hex.trim()).map_err(ProgError::SeedNotHex)?;
    if bytes.len() != pwgen::byte_source::SEED_LEN {
        return Err(ProgError::SeedWrongLength(bytes.len()));
    }
    Ok(Seed(bytes))
}
