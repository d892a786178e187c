//! Short code generation and alias validation.
//!
//! Provides cryptographically secure random code generation and the format
//! check for caller-chosen aliases. Neither function touches the store.

use regex::Regex;
use std::sync::LazyLock;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 7;

/// URL-safe alphabet. Exactly 64 symbols, so one random byte masked to six
/// bits picks a symbol without bias.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Compiled regex for alias validation.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").unwrap());

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and produces a 7-character code over
/// `[A-Za-z0-9_-]`. Uniqueness is not assumed; callers check the store.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(is_valid_alias(&code));
/// ```
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|byte| ALPHABET[usize::from(byte & 0x3f)] as char)
        .collect()
}

/// Returns `true` if `alias` is 3-20 characters of letters, digits, `_` or `-`.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_alias("my-link_2024"));
/// assert!(!is_valid_alias("go"));          // Too short
/// assert!(!is_valid_alias("me@home"));     // Invalid character
/// ```
pub fn is_valid_alias(alias: &str) -> bool {
    ALIAS_REGEX.is_match(alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
        }
    }

    #[test]
    fn test_generate_code_passes_alias_check() {
        assert!(is_valid_alias(&generate_code()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_alias_length_bounds() {
        assert!(is_valid_alias("abc"));
        assert!(is_valid_alias(&"a".repeat(20)));
        assert!(!is_valid_alias("go"));
        assert!(!is_valid_alias(&"a".repeat(21)));
        assert!(!is_valid_alias(""));
    }

    #[test]
    fn test_alias_allowed_characters() {
        assert!(is_valid_alias("My-Link_2024"));
        assert!(is_valid_alias("___"));
        assert!(is_valid_alias("---"));
    }

    #[test]
    fn test_alias_rejects_special_characters() {
        assert!(!is_valid_alias("me@home"));
        assert!(!is_valid_alias("my link"));
        assert!(!is_valid_alias("a/b/c"));
        assert!(!is_valid_alias("café"));
    }
}
