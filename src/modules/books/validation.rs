//! Field constraints that serde cannot express.

use std::ops::RangeInclusive;

use thiserror::Error;

use super::models::NewBook;

pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// First constraint a payload violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for NewBook {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;

        if !RATING_RANGE.contains(&self.rating) {
            return Err(ValidationError::new(
                "rating",
                format!(
                    "must be between {} and {}, got {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end(),
                    self.rating
                ),
            ));
        }

        if self.pages < 0 {
            return Err(ValidationError::new(
                "pages",
                format!("must be zero or positive, got {}", self.pages),
            ));
        }

        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::BookStatus;

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: vec!["sci-fi".to_string()],
            rating: 5,
            pages: 412,
            status: BookStatus::Available,
        }
    }

    #[test]
    fn accepts_valid_book() {
        assert_eq!(dune().validate(), Ok(()));

        let minimal = NewBook {
            pages: 0,
            rating: 1,
            genre: vec![],
            ..dune()
        };
        assert_eq!(minimal.validate(), Ok(()));
    }

    #[test]
    fn rejects_rating_out_of_range() {
        for rating in [0, 6, -3] {
            let book = NewBook { rating, ..dune() };
            assert_eq!(book.validate().unwrap_err().field, "rating");
        }
    }

    #[test]
    fn rejects_negative_pages() {
        let book = NewBook {
            pages: -1,
            ..dune()
        };
        let err = book.validate().unwrap_err();
        assert_eq!(err.field, "pages");
        assert_eq!(err.to_string(), "pages: must be zero or positive, got -1");
    }

    #[test]
    fn rejects_blank_text() {
        let book = NewBook {
            title: "  ".to_string(),
            ..dune()
        };
        assert_eq!(book.validate().unwrap_err().field, "title");

        let book = NewBook {
            author: String::new(),
            ..dune()
        };
        assert_eq!(book.validate().unwrap_err().field, "author");
    }

    #[test]
    fn reports_first_violation_only() {
        let book = NewBook {
            title: String::new(),
            rating: 9,
            pages: -5,
            ..dune()
        };
        assert_eq!(book.validate().unwrap_err().field, "title");
    }
}
