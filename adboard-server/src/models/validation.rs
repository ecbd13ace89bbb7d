//! Field validators for ad and profile input
//!
//! Each validator inspects a single field value and returns a field-scoped
//! `ValidationError` when a domain rule is violated. Validators run only
//! during an explicit validation pass (see `NewAd::validate`); repository
//! writes never call them.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for ad titles (characters)
pub const MAX_TITLE_LEN: usize = 50;

/// Minimum trimmed length for ad content (characters)
pub const MIN_CONTENT_LEN: usize = 10;

/// Allowed phone alphabet: digits, `+`, space, `-`, `(`, `)`.
/// The empty string matches (the field is optional).
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+0-9 ()\-]*$").expect("invalid phone regex"));

/// Validation error for domain input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be strictly positive
    NotPositive { field: &'static str },

    /// Field contains a denylisted word
    BannedWord { field: &'static str, word: String },

    /// Field is shorter than the minimum (after trimming)
    TooShort { field: &'static str, min: usize },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the required character set or format
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field } => write!(f, "{} must be greater than 0", field),
            Self::BannedWord { field, word } => {
                write!(f, "{} contains a banned word: '{}'", field, word)
            }
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate that a price is strictly positive.
///
/// Stricter than the stored `price >= 0` check constraint: a zero price
/// passes the database but fails here.
pub fn validate_positive_price(value: f64) -> Result<(), ValidationError> {
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field: "price" });
    }
    Ok(())
}

/// Validate that a title contains no denylisted word.
///
/// Matching is case-insensitive substring containment, not tokenized word
/// matching: a title exactly equal to a denylist entry fails, and so does
/// one merely containing it. Entries are expected lowercase (see
/// `ModerationConfig`).
pub fn validate_no_banned_words(value: &str, banned: &[String]) -> Result<(), ValidationError> {
    let lower = value.to_lowercase();
    for word in banned {
        if lower.contains(word.as_str()) {
            return Err(ValidationError::BannedWord {
                field: "title",
                word: word.clone(),
            });
        }
    }
    Ok(())
}

/// Validate that content has at least [`MIN_CONTENT_LEN`] characters after
/// trimming leading/trailing whitespace.
pub fn validate_min_length(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_CONTENT_LEN {
        return Err(ValidationError::TooShort {
            field: "content",
            min: MIN_CONTENT_LEN,
        });
    }
    Ok(())
}

/// Validate a phone number against the allowed character set.
///
/// # Example
/// ```
/// use adboard_server::models::validate_phone;
///
/// assert!(validate_phone("+7 (912) 345-67-89").is_ok());
/// assert!(validate_phone("").is_ok()); // optional field
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "only digits, '+', spaces, '-', '(' and ')' are allowed",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denylist() -> Vec<String> {
        vec!["дурак".to_string(), "скам".to_string()]
    }

    #[test]
    fn price_accepts_iff_positive() {
        assert!(validate_positive_price(150.0).is_ok());
        assert!(validate_positive_price(0.01).is_ok());

        let err = validate_positive_price(0.0).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { field: "price" }));
        assert!(validate_positive_price(-5.0).is_err());
    }

    #[test]
    fn banned_word_any_case_mix() {
        for title in ["дурак", "ДУРАК", "ДуРаК", "полный ДУРАК тут"] {
            let err = validate_no_banned_words(title, &denylist()).unwrap_err();
            assert!(
                matches!(err, ValidationError::BannedWord { ref word, .. } if word == "дурак"),
                "expected banned-word error for {:?}",
                title
            );
        }
    }

    #[test]
    fn banned_word_as_substring() {
        assert!(validate_no_banned_words("это скамейка", &denylist()).is_err());
    }

    #[test]
    fn banned_word_carries_offender() {
        let err = validate_no_banned_words("чистый скам", &denylist()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BannedWord {
                field: "title",
                word: "скам".to_string(),
            }
        );
    }

    #[test]
    fn clean_title_passes() {
        assert!(validate_no_banned_words("Selling my bike", &denylist()).is_ok());
        assert!(validate_no_banned_words("Selling my bike", &[]).is_ok());
    }

    #[test]
    fn min_length_boundary() {
        // 10 trimmed chars is the boundary: exactly 10 passes
        assert!(validate_min_length("0123456789").is_ok());
        assert!(validate_min_length("012345678").is_err());
    }

    #[test]
    fn min_length_trims_whitespace() {
        // 9 chars padded with whitespace still fails
        assert!(validate_min_length("  012345678  \n").is_err());
        assert!(validate_min_length("   ").is_err());
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        // 10 Cyrillic chars are 20 bytes; must still pass
        assert!(validate_min_length("объявление").is_ok());
    }

    #[test]
    fn phone_allowed_alphabet() {
        assert!(validate_phone("+7 (912) 345-67-89").is_ok());
        assert!(validate_phone("89123456789").is_ok());
        assert!(validate_phone("").is_ok());
    }

    #[test]
    fn phone_rejects_other_characters() {
        let err = validate_phone("+7 912 abc").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "phone", .. }));
        assert!(validate_phone("123#456").is_err());
    }

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 50,
        };
        assert_eq!(err.to_string(), "title exceeds maximum length of 50 characters");

        let err = ValidationError::BannedWord {
            field: "title",
            word: "скам".to_string(),
        };
        assert_eq!(err.to_string(), "title contains a banned word: 'скам'");
    }
}
