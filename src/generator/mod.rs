//! Secure random password generator.
//!
//! A character pool is assembled from the enabled categories (each minus
//! the excluded characters) followed by any custom characters, and every
//! output character is drawn independently and uniformly from that pool.
//!
//! Draws use `rand::rng()`, a CSPRNG seeded from the OS, through a
//! `Uniform` index distribution whose sampler rejects out-of-zone values,
//! so every pool position is exactly equally likely.

use rand::distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*";

/// Length used when nothing else is configured.
pub const DEFAULT_LENGTH: usize = 16;

/// Longest password `generate` will produce.
pub const MAX_LENGTH: usize = 4096;

/// Which characters a generated password may contain, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of characters to produce.
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Extra characters appended to the pool as-is.
    pub custom_chars: String,
    /// Characters removed from the built-in categories.
    pub exclude_chars: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            custom_chars: String::new(),
            exclude_chars: String::new(),
        }
    }
}

impl GeneratorConfig {
    /// Assemble the character pool.
    ///
    /// Custom characters are not deduplicated against the categories, so a
    /// character that appears twice is twice as likely to be drawn.
    pub fn pool(&self) -> Vec<char> {
        let categories = [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ];

        let mut pool: Vec<char> = categories
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, set)| set.chars())
            .filter(|c| !self.exclude_chars.contains(*c))
            .collect();

        pool.extend(self.custom_chars.chars());
        pool
    }
}

/// Generate a password according to `config`.
///
/// `length` must be between 1 and `MAX_LENGTH`.
pub fn generate(config: &GeneratorConfig) -> Result<Zeroizing<String>> {
    if config.length == 0 || config.length > MAX_LENGTH {
        return Err(PassVaultError::ConfigurationError(format!(
            "password length must be between 1 and {MAX_LENGTH}"
        )));
    }

    let pool = config.pool();
    if pool.is_empty() {
        return Err(PassVaultError::ConfigurationError(
            "no characters to choose from — enable a category or add custom characters".into(),
        ));
    }

    let index = Uniform::<usize>::new(0, pool.len())
        .map_err(|e| PassVaultError::ConfigurationError(format!("character pool: {e}")))?;

    // Sized for the widest character so the buffer never reallocates and
    // leaves a partial copy behind.
    let mut password = Zeroizing::new(String::with_capacity(buffer_len(&pool, config.length)));
    let mut rng = rand::rng();
    for _ in 0..config.length {
        password.push(pool[index.sample(&mut rng)]);
    }

    Ok(password)
}

/// Bytes needed for `length` characters drawn from `pool`.
fn buffer_len(pool: &[char], length: usize) -> usize {
    let widest = pool.iter().map(|c| c.len_utf8()).max().unwrap_or(1);
    widest * length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(custom: &str) -> GeneratorConfig {
        GeneratorConfig {
            length: 32,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
            custom_chars: custom.into(),
            exclude_chars: String::new(),
        }
    }

    #[test]
    fn default_pool_has_all_categories() {
        let pool = GeneratorConfig::default().pool();
        assert_eq!(pool.len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    #[test]
    fn exclude_filters_categories_but_not_custom() {
        let config = GeneratorConfig {
            uppercase: false,
            lowercase: false,
            symbols: false,
            custom_chars: "0x".into(),
            exclude_chars: "0123".into(),
            ..GeneratorConfig::default()
        };

        let pool = config.pool();
        assert_eq!(pool, vec!['4', '5', '6', '7', '8', '9', '0', 'x']);
    }

    #[test]
    fn custom_chars_are_not_deduplicated() {
        let config = GeneratorConfig {
            uppercase: false,
            lowercase: false,
            symbols: false,
            custom_chars: "01".into(),
            ..GeneratorConfig::default()
        };
        assert_eq!(config.pool().len(), 12);
    }

    #[test]
    fn unicode_custom_chars_are_whole_characters() {
        let password = generate(&only("é€")).unwrap();
        assert_eq!(password.chars().count(), 32);
        assert!(password.chars().all(|c| c == 'é' || c == '€'));
    }

    #[test]
    fn zero_length_is_rejected() {
        let config = GeneratorConfig {
            length: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(PassVaultError::ConfigurationError(_))
        ));
    }

    #[test]
    fn length_above_maximum_is_rejected() {
        for length in [MAX_LENGTH + 1, MAX_LENGTH * 1024, usize::MAX] {
            let config = GeneratorConfig {
                length,
                ..GeneratorConfig::default()
            };
            assert!(matches!(
                generate(&config),
                Err(PassVaultError::ConfigurationError(_))
            ));
        }
    }

    #[test]
    fn maximum_length_is_allowed() {
        let config = GeneratorConfig {
            length: MAX_LENGTH,
            ..GeneratorConfig::default()
        };
        assert_eq!(generate(&config).unwrap().chars().count(), MAX_LENGTH);
    }

    #[test]
    fn buffer_fits_multibyte_output_without_growing() {
        let config = GeneratorConfig {
            length: 100,
            ..only("€")
        };
        let password = generate(&config).unwrap();

        assert_eq!(buffer_len(&config.pool(), 100), 300);
        assert_eq!(password.len(), 300);
        assert_eq!(password.capacity(), 300);
    }

    #[test]
    fn everything_excluded_is_rejected() {
        let config = GeneratorConfig {
            uppercase: false,
            lowercase: false,
            symbols: false,
            exclude_chars: DIGITS.into(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(PassVaultError::ConfigurationError(_))
        ));
    }
}
