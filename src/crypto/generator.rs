//! Random password generation with character-class constraints.
//!
//! Lowercase letters are always part of the alphabet; uppercase, digits
//! and symbols can each be switched off.  Every enabled class is
//! guaranteed to appear at least once, and the final order is shuffled
//! so the mandatory characters are not grouped at the front.
//!
//! Randomness comes from `rand::rng()`, a CSPRNG reseeded from the OS.

use rand::seq::SliceRandom;
use rand::Rng;
use zeroize::Zeroize;

/// Shortest password the generator will produce.
pub const MIN_LENGTH: usize = 8;

/// Length used when the caller does not ask for one.
pub const DEFAULT_LENGTH: usize = 16;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// The fixed symbol alphabet.
pub const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Which optional character classes to include, and how long the result should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// A freshly generated password.
///
/// `clamped_from` is `Some(n)` when the requested length `n` was below
/// `MIN_LENGTH` and the password was lengthened to `MIN_LENGTH`.
pub struct GeneratedPassword {
    pub password: String,
    pub clamped_from: Option<usize>,
}

impl GeneratedPassword {
    /// Consume the wrapper, keeping only the password.
    pub fn into_password(self) -> String {
        self.password
    }
}

/// Generate a password from `options`.
pub fn generate(options: &GeneratorOptions) -> GeneratedPassword {
    let (length, clamped_from) = if options.length < MIN_LENGTH {
        tracing::debug!(
            requested = options.length,
            used = MIN_LENGTH,
            "password length raised to minimum"
        );
        (MIN_LENGTH, Some(options.length))
    } else {
        (options.length, None)
    };

    let mut classes: Vec<&[u8]> = vec![LOWERCASE];
    if options.uppercase {
        classes.push(UPPERCASE);
    }
    if options.digits {
        classes.push(DIGITS);
    }
    if options.symbols {
        classes.push(SYMBOLS);
    }
    let alphabet: Vec<u8> = classes.concat();

    let mut rng = rand::rng();
    let mut buf: Vec<u8> = Vec::with_capacity(length);

    // One mandatory character from each enabled class.
    for class in &classes {
        buf.push(class[rng.random_range(0..class.len())]);
    }

    while buf.len() < length {
        buf.push(alphabet[rng.random_range(0..alphabet.len())]);
    }

    buf.shuffle(&mut rng);

    let password: String = buf.iter().copied().map(char::from).collect();
    buf.zeroize();

    GeneratedPassword {
        password,
        clamped_from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(length: usize, uppercase: bool, digits: bool, symbols: bool) -> GeneratorOptions {
        GeneratorOptions {
            length,
            uppercase,
            digits,
            symbols,
        }
    }

    #[test]
    fn all_classes_present_at_length_20() {
        for _ in 0..200 {
            let pw = generate(&opts(20, true, true, true)).into_password();
            assert_eq!(pw.len(), 20);
            assert!(pw.bytes().any(|b| b.is_ascii_lowercase()));
            assert!(pw.bytes().any(|b| b.is_ascii_uppercase()));
            assert!(pw.bytes().any(|b| b.is_ascii_digit()));
            assert!(pw.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn short_length_is_raised_and_reported() {
        let generated = generate(&opts(4, true, true, true));
        assert_eq!(generated.password.len(), MIN_LENGTH);
        assert_eq!(generated.clamped_from, Some(4));
    }

    #[test]
    fn minimum_length_is_not_reported_as_clamped() {
        let generated = generate(&opts(MIN_LENGTH, false, false, false));
        assert_eq!(generated.password.len(), MIN_LENGTH);
        assert_eq!(generated.clamped_from, None);
    }

    #[test]
    fn lowercase_only_when_everything_disabled() {
        for _ in 0..50 {
            let pw = generate(&opts(32, false, false, false)).into_password();
            assert!(pw.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn disabled_classes_never_appear() {
        for _ in 0..50 {
            let pw = generate(&opts(40, true, false, false)).into_password();
            assert!(pw.bytes().all(|b| b.is_ascii_alphabetic()));
            assert!(pw.bytes().any(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn mandatory_characters_are_not_grouped_at_the_front() {
        // With 4 classes the seeded prefix would be lower/upper/digit/symbol
        // every time if the shuffle were missing.
        let grouped = (0..100)
            .filter(|_| {
                let pw = generate(&opts(8, true, true, true)).into_password();
                let b = pw.as_bytes();
                b[0].is_ascii_lowercase()
                    && b[1].is_ascii_uppercase()
                    && b[2].is_ascii_digit()
                    && SYMBOLS.contains(&b[3])
            })
            .count();
        assert!(grouped < 20, "prefix looked class-grouped {grouped}/100 times");
    }

    #[test]
    fn consecutive_passwords_differ() {
        let a = generate(&GeneratorOptions::default()).into_password();
        let b = generate(&GeneratorOptions::default()).into_password();
        assert_eq!(a.len(), DEFAULT_LENGTH);
        assert_ne!(a, b);
    }
}
