//! IMO number checksum validation.
//!
//! An IMO number is seven digits; the last is a check digit equal to the sum
//! of the first six weighted 7, 6, 5, 4, 3, 2, taken mod 10.

use thiserror::Error;

/// Number of digits in a canonical IMO number.
pub const IMO_LENGTH: usize = 7;

const WEIGHTS: [u32; IMO_LENGTH - 1] = [7, 6, 5, 4, 3, 2];

/// Why a non-blank IMO value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidImo {
    #[error("invalid length: {length} digits")]
    WrongLength { length: usize },

    #[error("invalid check digit: expected {expected}, got {actual}")]
    BadCheckDigit { expected: u32, actual: u32 },
}

/// Validate a raw IMO value.
///
/// Blank input is not an error and yields `Ok(None)`. Otherwise all
/// non-digit characters are stripped and the remaining seven digits are
/// checksummed; the canonical form is the digit string itself.
pub fn validate_imo(raw: &str) -> Result<Option<String>, InvalidImo> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != IMO_LENGTH {
        return Err(InvalidImo::WrongLength {
            length: digits.len(),
        });
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    let expected = check_digit(&values[..IMO_LENGTH - 1]);
    let actual = values[IMO_LENGTH - 1];
    if expected != actual {
        return Err(InvalidImo::BadCheckDigit { expected, actual });
    }
    Ok(Some(digits))
}

fn check_digit(leading: &[u32]) -> u32 {
    leading
        .iter()
        .zip(WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum::<u32>()
        % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_good_imo() {
        assert_eq!(validate_imo("9074729"), Ok(Some("9074729".to_string())));
        assert_eq!(validate_imo("IMO 9074729"), Ok(Some("9074729".to_string())));
        assert_eq!(validate_imo("907-4729"), Ok(Some("9074729".to_string())));
    }

    #[test]
    fn blank_is_absent() {
        assert_eq!(validate_imo(""), Ok(None));
        assert_eq!(validate_imo("   "), Ok(None));
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            validate_imo("907472"),
            Err(InvalidImo::WrongLength { length: 6 })
        );
        assert_eq!(
            validate_imo("unknown"),
            Err(InvalidImo::WrongLength { length: 0 })
        );
    }

    #[test]
    fn bad_check_digit_reports_both_digits() {
        let err = validate_imo("9074728").unwrap_err();
        assert_eq!(
            err,
            InvalidImo::BadCheckDigit {
                expected: 9,
                actual: 8
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid check digit: expected 9, got 8"
        );
    }
}
