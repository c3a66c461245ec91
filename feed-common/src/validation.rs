use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::post::NewPost;

use crate::consts::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS};

/// Reasons a post draft is rejected before it reaches the backend.
/// The messages are meant to be shown to the user as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all the fields and select at least one category.")]
    MissingFields,
    #[error(
        "Please be more concise with your question (max {} characters).",
        MAX_TITLE_CHARS
    )]
    TitleTooLong,
    #[error("The description limit is {} characters.", MAX_CONTENT_CHARS)]
    ContentTooLong,
}

/// Post as typed in the creation form
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Selected category ids
    pub categories: Vec<u64>,
}

impl PostDraft {
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty()
            || self.content.trim().is_empty()
            || self.categories.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong);
        }
        if self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong);
        }
        Ok(())
    }

    pub fn into_request(self, creator: u64, is_student: bool) -> Result<NewPost, ValidationError> {
        self.check()?;
        Ok(NewPost {
            is_student,
            creator,
            question: self.title,
            content: self.content,
            categories: self.categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            content: content.into(),
            categories: vec![1],
        }
    }

    #[test]
    fn accepts_limits_inclusive() {
        let d = draft(&"t".repeat(99), &"c".repeat(999));
        let req = d.into_request(4, true).unwrap();
        assert_eq!(req.creator, 4);
        assert!(req.is_student);
        assert_eq!(req.categories, vec![1]);
    }

    #[test]
    fn rejects_long_fields() {
        assert_eq!(
            draft(&"t".repeat(150), "body").check(),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            draft("title", &"c".repeat(1000)).check(),
            Err(ValidationError::ContentTooLong)
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 99 two-byte characters
        assert!(draft(&"é".repeat(99), "body").check().is_ok());
    }

    #[test]
    fn requires_every_field() {
        assert_eq!(
            draft("  ", "body").check(),
            Err(ValidationError::MissingFields)
        );
        let mut no_category = draft("title", "body");
        no_category.categories.clear();
        assert_eq!(no_category.check(), Err(ValidationError::MissingFields));
        assert_eq!(
            ValidationError::TitleTooLong.to_string(),
            "Please be more concise with your question (max 99 characters)."
        );
    }
}
