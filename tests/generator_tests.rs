//! Integration tests for the password generator.

use std::collections::HashMap;

use passvault::errors::PassVaultError;
use passvault::generator::{
    generate, GeneratorConfig, DIGITS, LOWERCASE, MAX_LENGTH, SYMBOLS, UPPERCASE,
};

fn nothing_enabled() -> GeneratorConfig {
    GeneratorConfig {
        uppercase: false,
        lowercase: false,
        digits: false,
        symbols: false,
        ..GeneratorConfig::default()
    }
}

#[test]
fn default_config_generates_sixteen_characters() {
    let password = generate(&GeneratorConfig::default()).unwrap();
    assert_eq!(password.chars().count(), 16);
}

#[test]
fn length_twelve_draws_only_from_the_pool() {
    let config = GeneratorConfig {
        length: 12,
        symbols: false,
        exclude_chars: "0O1lI".into(),
        custom_chars: "-_".into(),
        ..GeneratorConfig::default()
    };

    for _ in 0..200 {
        let password = generate(&config).unwrap();
        assert_eq!(password.chars().count(), 12);

        for c in password.chars() {
            let allowed = c == '-'
                || c == '_'
                || ((UPPERCASE.contains(c) || LOWERCASE.contains(c) || DIGITS.contains(c))
                    && !"0O1lI".contains(c));
            assert!(allowed, "unexpected character {c:?}");
        }
    }
}

#[test]
fn symbols_only() {
    let config = GeneratorConfig {
        symbols: true,
        length: 64,
        ..nothing_enabled()
    };

    let password = generate(&config).unwrap();
    assert!(password.chars().all(|c| SYMBOLS.contains(c)));
}

#[test]
fn custom_chars_alone_are_enough() {
    let config = GeneratorConfig {
        custom_chars: "xyz".into(),
        ..nothing_enabled()
    };

    let password = generate(&config).unwrap();
    assert!(password.chars().all(|c| "xyz".contains(c)));
}

#[test]
fn empty_pool_is_a_configuration_error() {
    let result = generate(&nothing_enabled());
    assert!(matches!(result, Err(PassVaultError::ConfigurationError(_))));
}

#[test]
fn oversized_length_is_a_configuration_error() {
    let config = GeneratorConfig {
        length: usize::MAX,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        generate(&config),
        Err(PassVaultError::ConfigurationError(_))
    ));

    let config = GeneratorConfig {
        length: MAX_LENGTH + 1,
        ..GeneratorConfig::default()
    };
    assert!(generate(&config).is_err());
}

#[test]
fn draws_are_roughly_uniform() {
    // Three characters do not evenly divide any power of two, which is
    // exactly where a modulo-based draw would be biased.
    let config = GeneratorConfig {
        length: 3_000,
        custom_chars: "abc".into(),
        ..nothing_enabled()
    };

    let mut counts: HashMap<char, usize> = HashMap::new();
    for _ in 0..10 {
        let password = generate(&config).unwrap();
        for c in password.chars() {
            *counts.entry(c).or_default() += 1;
        }
    }

    assert_eq!(counts.len(), 3);
    for (c, n) in counts {
        assert!(
            (9_000..=11_000).contains(&n),
            "{c:?} drawn {n} times out of 30000"
        );
    }
}

#[test]
fn consecutive_passwords_differ() {
    let config = GeneratorConfig {
        length: 32,
        ..GeneratorConfig::default()
    };

    let a = generate(&config).unwrap();
    let b = generate(&config).unwrap();
    assert_ne!(*a, *b);
}
