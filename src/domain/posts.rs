//! Posts as the client sees them: read-only copies fetched per render, and drafts
//! submitted by teachers.

pub use noticeboard_api_types::Post;

use super::error::DomainError;

pub fn author_name(post: &Post) -> String {
    format!("{} {}", post.author_first_name, post.author_last_name)
}

/// A post as typed into the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub class_id: u64,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        class_id: u64,
    ) -> Result<Self, DomainError> {
        let draft = Self {
            title: title.into(),
            content: content.into(),
            class_id,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_non_empty(&self.title, "title")?;
        ensure_non_empty(&self.content, "content")?;
        if self.class_id == 0 {
            return Err(DomainError::validation("class id must be greater than zero"));
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
