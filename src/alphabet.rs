//! The character sets passwords are sampled from.

use std::fmt;

use crate::GenerationError;

pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static NUMBERS: &str = "0123456789";
pub static SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/~`";

/// Characters that are easily confused with one another when read back.
pub static AMBIGUOUS: &str = "O0Il1";

/// A sampler draws one byte per attempt, so it can't address more than this many characters.
pub const MAX_ALPHABET_LEN: usize = 256;

/// An ordered set of distinct characters, with between 2 and [`MAX_ALPHABET_LEN`] members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet(Vec<char>);

impl Alphabet {
    /// Build an alphabet from the given characters, in order.
    ///
    /// Repeated characters are dropped; the first occurrence keeps its position.
    pub fn new<I>(chars: I) -> Result<Alphabet, GenerationError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut abc = Vec::new();
        for ch in chars {
            if !abc.contains(&ch) {
                abc.push(ch);
            }
        }
        if abc.len() < 2 || abc.len() > MAX_ALPHABET_LEN {
            return Err(GenerationError::Config(abc.len()));
        }
        Ok(Alphabet(abc))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.0 {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Assemble the alphabet for the given options.
///
/// The base set is the uppercase letters, then the lowercase letters, then the digits. Symbols
/// are appended after those. Excluding ambiguous characters filters out [`AMBIGUOUS`] without
/// disturbing the order of what remains.
pub fn build_alphabet(
    include_symbols: bool,
    exclude_ambiguous: bool,
) -> Result<Alphabet, GenerationError> {
    let mut sets = vec![UPPERCASE, LOWERCASE, NUMBERS];
    if include_symbols {
        sets.push(SYMBOLS);
    }
    let chars = sets
        .into_iter()
        .flat_map(str::chars)
        .filter(|ch| !(exclude_ambiguous && AMBIGUOUS.contains(*ch)));
    let alphabet = Alphabet::new(chars)?;
    tracing::debug!(
        size = alphabet.len(),
        include_symbols,
        exclude_ambiguous,
        "built alphabet"
    );
    Ok(alphabet)
}
