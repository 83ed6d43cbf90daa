//! CPF (Brazilian tax identifier) format validation.
//!
//! The store treats the CPF as an opaque unique string; this module only
//! guards its shape. Accepted forms are the canonical `ddd.ddd.ddd-dd`
//! and the bare 11-digit variant.

use creditapp_core::{DomainError, DomainResult};

/// Validate the shape of a CPF string.
pub fn validate(cpf: &str) -> DomainResult<()> {
    if is_formatted(cpf) || is_bare(cpf) {
        return Ok(());
    }
    Err(DomainError::validation(format!("invalid CPF: {cpf}")))
}

fn is_formatted(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 14 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        3 | 7 => *b == b'.',
        11 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

fn is_bare(s: &str) -> bool {
    s.len() == 11 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_canonical_format() {
        assert!(validate("166.876.568-99").is_ok());
    }

    #[test]
    fn accepts_bare_digits() {
        assert!(validate("16687656899").is_ok());
    }

    #[test]
    fn rejects_misplaced_separators() {
        assert!(validate("166.876.56-899").is_err());
        assert!(validate("166-876-568.99").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(validate("166.876.568-9").is_err());
        assert!(validate("1668765689").is_err());
        assert!(validate("").is_err());
    }

    #[test]
    fn rejects_letters() {
        assert!(validate("166.876.56a-99").is_err());
        assert!(validate("abcdefghijk").is_err());
    }

    proptest! {
        #[test]
        fn any_eleven_digit_string_is_accepted(digits in "[0-9]{11}") {
            prop_assert!(validate(&digits).is_ok());
        }

        #[test]
        fn formatting_a_valid_bare_cpf_keeps_it_valid(digits in "[0-9]{11}") {
            let formatted = format!(
                "{}.{}.{}-{}",
                &digits[0..3],
                &digits[3..6],
                &digits[6..9],
                &digits[9..11]
            );
            prop_assert!(validate(&formatted).is_ok());
        }
    }
}
