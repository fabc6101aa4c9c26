//! Sources of the random bytes that passwords are sampled from.

use std::fmt;

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::GenerationError;

type HmacSha256 = Hmac<Sha256>;

/// Length, in bytes, of the key for a [`DeterministicByteSource`].
pub const SEED_LEN: usize = 32;

/// Domain separation label mixed into every block of a [`DeterministicByteSource`].
pub const CONTEXT_LABEL: &[u8] = b"pwgen/hmac-sha256-byte-source/v1";

const BLOCK_LEN: usize = 32;

/// Something that hands out pseudorandom bytes, never returning the same byte twice.
pub trait ByteSource {
    fn fill_bytes(&mut self, dest: &mut [u8]);

    fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.fill_bytes(&mut byte);
        byte[0]
    }

    fn next_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; n];
        self.fill_bytes(&mut bytes);
        bytes
    }
}

/// Bytes straight from the operating system's CSPRNG.
///
/// Each request is independent; there is no state to leak or to reuse.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureByteSource;

impl SecureByteSource {
    pub fn new() -> SecureByteSource {
        SecureByteSource
    }
}

impl ByteSource for SecureByteSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// A reproducible byte stream keyed by a 32-byte seed.
///
/// Block `i` of the stream is `HMAC-SHA256(seed, be64(i) || CONTEXT_LABEL)`, with `i` counting
/// up from zero. Bytes are handed out from each block in order, and a new block is computed once
/// the current one has been used up.
///
/// This is **not** a validated DRBG. It exists so that output can be reproduced from a seed, for
/// tests and demonstrations; it is no stronger than the secrecy of the seed.
///
/// Not `Clone`: a copy would hand out the same bytes again.
pub struct DeterministicByteSource {
    mac: HmacSha256,
    counter: u64,
    block: [u8; BLOCK_LEN],
    /// Index of the next unread byte in `block`. `BLOCK_LEN` when the block is spent.
    offset: usize,
}

impl DeterministicByteSource {
    pub fn new(seed: &[u8]) -> Result<DeterministicByteSource, GenerationError> {
        if seed.len() != SEED_LEN {
            return Err(GenerationError::InvalidSeed(seed.len()));
        }
        let mac = HmacSha256::new_from_slice(seed)
            .map_err(|_| GenerationError::InvalidSeed(seed.len()))?;
        tracing::debug!("created deterministic byte source");
        Ok(DeterministicByteSource {
            mac,
            counter: 0,
            block: [0u8; BLOCK_LEN],
            offset: BLOCK_LEN,
        })
    }

    /// The number of blocks computed so far, which is also the counter of the next block.
    pub fn blocks_generated(&self) -> u64 {
        self.counter
    }

    fn next_block(&mut self) {
        let mut mac = self.mac.clone();
        mac.update(&self.counter.to_be_bytes());
        mac.update(CONTEXT_LABEL);
        self.block.copy_from_slice(&mac.finalize().into_bytes());
        self.counter += 1;
        self.offset = 0;
    }
}

impl ByteSource for DeterministicByteSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut filled = 0;
        while filled < dest.len() {
            if self.offset == BLOCK_LEN {
                self.next_block();
            }
            let take = std::cmp::min(BLOCK_LEN - self.offset, dest.len() - filled);
            dest[filled..filled + take]
                .copy_from_slice(&self.block[self.offset..self.offset + take]);
            self.offset += take;
            filled += take;
        }
    }
}

impl fmt::Debug for DeterministicByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeterministicByteSource")
            .field("seed", &"[REDACTED]")
            .field("counter", &self.counter)
            .finish()
    }
}
