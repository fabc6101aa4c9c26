//! Utilities for generating passwords.

use crate::alphabet::Alphabet;
use crate::byte_source::ByteSource;
use crate::{GenerationError, Secret};

/// Upper bound on the bytes requested from a source in one go.
const MAX_CHUNK: usize = 64;

/// Generate a password by uniformly sampling the given alphabet, using bytes from `source`.
///
/// Reducing a byte modulo the alphabet size directly would favour the first `256 % len`
/// characters. Instead, bytes at or above the largest multiple of the alphabet size that fits in
/// a byte are thrown away and another byte is drawn. The expected number of draws per character
/// is `256 / limit`, which is under 2 even for the worst case of a 129 character alphabet.
///
/// Characters appear in the order their bytes were accepted.
pub fn sample<S>(
    length: i64,
    alphabet: &Alphabet,
    source: &mut S,
) -> Result<Secret, GenerationError>
where
    S: ByteSource + ?Sized,
{
    let length = checked_length(length)?;
    let limit = acceptance_limit(alphabet)?;
    let chars = alphabet.chars();

    // Grown as characters are accepted; `length` is caller controlled and may be absurd.
    let mut password = String::new();
    let mut accepted = 0;
    let mut rejected = 0usize;
    while accepted < length {
        // Each byte yields at most one character, so asking for no more than the number still
        // missing consumes the stream the same way as drawing one byte at a time.
        let chunk = std::cmp::min(length - accepted, MAX_CHUNK);
        for byte in source.next_bytes(chunk) {
            let byte = usize::from(byte);
            if byte >= limit {
                rejected += 1;
                continue;
            }
            password.push(chars[byte % chars.len()]);
            accepted += 1;
        }
    }
    tracing::trace!(length, alphabet_size = chars.len(), rejected, "sampled password");
    Ok(Secret(password))
}

/// Generate `count` passwords, one after the other, from the same source.
///
/// With a [`DeterministicByteSource`](crate::DeterministicByteSource) each password continues
/// where the previous one stopped reading the stream, so the passwords of one call are
/// reproducible as a whole and don't repeat each other.
pub fn sample_many<S>(
    count: usize,
    length: i64,
    alphabet: &Alphabet,
    source: &mut S,
) -> Result<Vec<Secret>, GenerationError>
where
    S: ByteSource + ?Sized,
{
    checked_length(length)?;
    acceptance_limit(alphabet)?;
    let mut passwords = Vec::new();
    for _ in 0..count {
        passwords.push(sample(length, alphabet, source)?);
    }
    Ok(passwords)
}

fn checked_length(length: i64) -> Result<usize, GenerationError> {
    usize::try_from(length)
        .ok()
        .filter(|&len| len > 0)
        .ok_or(GenerationError::InvalidLength(length))
}

/// Bytes below this value are accepted; it's the largest multiple of the alphabet size that
/// doesn't exceed 256.
fn acceptance_limit(alphabet: &Alphabet) -> Result<usize, GenerationError> {
    let size = alphabet.len();
    if !(2..=crate::alphabet::MAX_ALPHABET_LEN).contains(&size) {
        return Err(GenerationError::Config(size));
    }
    Ok((256 / size) * size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::build_alphabet;

    /// Replays a fixed list of bytes, panicking if the sampler asks for more.
    struct Scripted(std::vec::IntoIter<u8>);

    impl Scripted {
        fn new(bytes: &[u8]) -> Scripted {
            Scripted(bytes.to_vec().into_iter())
        }
    }

    impl ByteSource for Scripted {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest {
                *b = self.0.next().expect("scripted source ran dry");
            }
        }
    }

    /// Counts up through every byte value, wrapping around.
    struct Cycle(u8);

    impl ByteSource for Cycle {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest {
                *b = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }
    }

    fn abc() -> Alphabet {
        Alphabet::new("abc".chars()).unwrap()
    }

    #[test]
    fn bytes_map_onto_the_alphabet_modulo_its_size() {
        let mut source = Scripted::new(&[0, 1, 2, 3, 4, 5, 254]);
        let pw = sample(7, &abc(), &mut source).unwrap();
        assert_eq!(pw.as_str(), "abcabcc");
    }

    #[test]
    fn bytes_past_the_limit_are_rejected() {
        // 255 is the only byte at or above the limit for a 3 character alphabet.
        let mut source = Scripted::new(&[255, 0, 255, 255, 1]);
        let pw = sample(2, &abc(), &mut source).unwrap();
        assert_eq!(pw.as_str(), "ab");

        // For 129 characters, everything from 129 upwards is thrown away.
        let wide = Alphabet::new((0..129).filter_map(|i| char::from_u32(0x4e00 + i)));
        let wide = wide.unwrap();
        let mut source = Scripted::new(&[129, 200, 255, 128, 0]);
        let pw = sample(2, &wide, &mut source).unwrap();
        let chars: Vec<char> = pw.as_str().chars().collect();
        assert_eq!(chars, vec![wide.chars()[128], wide.chars()[0]]);
    }

    #[test]
    fn no_bytes_are_rejected_when_size_divides_256() {
        let sixteen = Alphabet::new("0123456789abcdef".chars()).unwrap();
        let mut source = Scripted::new(&[255, 16, 31]);
        let pw = sample(3, &sixteen, &mut source).unwrap();
        assert_eq!(pw.as_str(), "f0f");
    }

    #[test]
    fn full_byte_cycles_give_exactly_even_counts() {
        let mut source = Cycle(0);
        // Each cycle of 256 bytes accepts 255 of them, 85 per character.
        let pw = sample(255 * 4, &abc(), &mut source).unwrap();
        for ch in ['a', 'b', 'c'] {
            assert_eq!(pw.as_str().chars().filter(|&c| c == ch).count(), 340);
        }
    }

    #[test]
    fn invalid_lengths_fail_before_drawing() {
        let mut source = Scripted::new(&[]);
        assert_eq!(
            sample(0, &abc(), &mut source).unwrap_err(),
            GenerationError::InvalidLength(0)
        );
        assert_eq!(
            sample(-3, &abc(), &mut source).unwrap_err(),
            GenerationError::InvalidLength(-3)
        );
        assert_eq!(
            sample_many(5, -1, &abc(), &mut source).unwrap_err(),
            GenerationError::InvalidLength(-1)
        );
    }

    #[test]
    fn many_passwords_continue_the_stream() {
        let mut source = Cycle(0);
        let pws = sample_many(3, 2, &abc(), &mut source).unwrap();
        let pws: Vec<&str> = pws.iter().map(|pw| pw.as_str()).collect();
        assert_eq!(pws, vec!["ab", "ca", "bc"]);
        assert!(sample_many(0, 2, &abc(), &mut source).unwrap().is_empty());
    }

    fn panic_message(result: std::thread::Result<impl Sized>) -> String {
        let payload = match result {
            Ok(_) => panic!("expected the source to run dry"),
            Err(payload) => payload,
        };
        payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default()
    }

    #[test]
    fn huge_counts_and_lengths_reserve_nothing_up_front() {
        let result = std::panic::catch_unwind(|| {
            let mut source = Scripted::new(&[0; 100]);
            sample_many(usize::MAX, 8, &abc(), &mut source)
        });
        assert_eq!(panic_message(result), "scripted source ran dry");

        let result = std::panic::catch_unwind(|| {
            let mut source = Scripted::new(&[0; 100]);
            sample(i64::MAX, &abc(), &mut source)
        });
        assert_eq!(panic_message(result), "scripted source ran dry");
    }

    #[test]
    fn long_passwords_are_drawn_in_small_chunks() {
        struct Recording(Vec<usize>, Cycle);

        impl ByteSource for Recording {
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                self.0.push(dest.len());
                self.1.fill_bytes(dest);
            }
        }

        let mut source = Recording(Vec::new(), Cycle(0));
        let pw = sample(200, &abc(), &mut source).unwrap();
        assert_eq!(pw.len(), 200);
        assert!(source.0.iter().all(|&n| n <= MAX_CHUNK));
        // No byte in 0..200 is rejected for a 3 character alphabet.
        assert_eq!(source.0, vec![64, 64, 64, 8]);
    }

    #[test]
    fn works_through_a_trait_object() {
        let alphabet = build_alphabet(false, false).unwrap();
        let mut source: Box<dyn ByteSource> = Box::new(Cycle(0));
        let pw = sample(4, &alphabet, source.as_mut()).unwrap();
        assert_eq!(pw.as_str(), "ABCD");
    }
}
