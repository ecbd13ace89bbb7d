//! Ad draft with an explicit validation pass
//!
//! `NewAd` carries the fields of the creation form. `validate` is the only
//! place the field validators run; `AdRepo::insert` takes whatever it is
//! given and leaves enforcement to the database constraints. A draft that
//! skips `validate` can therefore persist a title containing a banned word,
//! while a negative price is still rejected by the `price >= 0` check.

use serde::Deserialize;

use crate::config::ModerationConfig;

use super::validation::{
    validate_min_length, validate_no_banned_words, validate_positive_price, ValidationError,
    MAX_TITLE_LEN,
};

/// Fields for creating an ad
#[derive(Debug, Clone, Deserialize)]
pub struct NewAd {
    pub title: String,
    pub content: String,
    pub price: f64,
    /// Rubric the ad is filed under, if any
    pub rubric_id: Option<i64>,
}

impl NewAd {
    /// Run the field validators against this draft.
    ///
    /// # Rules
    /// - title: max 50 characters, no denylisted words
    /// - content: at least 10 characters after trimming
    /// - price: strictly greater than 0
    ///
    /// Returns the first violation found; fields are checked in the order
    /// above.
    pub fn validate(&self, moderation: &ModerationConfig) -> Result<(), ValidationError> {
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }
        validate_no_banned_words(&self.title, &moderation.banned_words)?;
        validate_min_length(&self.content)?;
        validate_positive_price(self.price)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str, price: f64) -> NewAd {
        NewAd {
            title: title.to_string(),
            content: content.to_string(),
            price,
            rubric_id: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        let ad = draft("Selling my bike", "Barely used, great condition", 150.0);
        assert!(ad.validate(&ModerationConfig::default()).is_ok());
    }

    #[test]
    fn banned_title_rejected_before_persistence() {
        let ad = draft("дурак", "irrelevant content text", 10.0);
        let err = ad.validate(&ModerationConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::BannedWord { ref word, .. } if word == "дурак"));
    }

    #[test]
    fn overlong_title_rejected() {
        let ad = draft(&"a".repeat(51), "long enough content", 10.0);
        let err = ad.validate(&ModerationConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 50, .. }));

        // 50 chars is the boundary
        let ad = draft(&"a".repeat(50), "long enough content", 10.0);
        assert!(ad.validate(&ModerationConfig::default()).is_ok());
    }

    #[test]
    fn short_content_rejected() {
        let ad = draft("Selling my bike", "too short", 10.0);
        assert!(ad.validate(&ModerationConfig::default()).is_err());
    }

    #[test]
    fn zero_price_fails_validation() {
        // The check constraint would accept 0; the validator must not
        let ad = draft("Selling my bike", "Barely used, great condition", 0.0);
        let err = ad.validate(&ModerationConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { field: "price" }));
    }

    #[test]
    fn custom_denylist_is_honored() {
        let moderation = ModerationConfig::new(vec!["bike".to_string()]);
        let ad = draft("Selling my bike", "Barely used, great condition", 150.0);
        assert!(ad.validate(&moderation).is_err());
    }
}
