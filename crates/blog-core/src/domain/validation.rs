//! Title/content rules shared by the forms and the API.
//!
//! Both the per-field (blur) path and the whole-form (submit) path go
//! through [`validate_field`], so the two can never disagree.

use std::fmt;

use serde::Serialize;

use super::post::PostDraft;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MIN_LEN: usize = 10;

/// A validated input field of a post form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
}

impl Field {
    /// Fields in form order; the first failing one receives focus.
    pub const ALL: [Field; 2] = [Field::Title, Field::Content];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule violation on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Check one field. The value is trimmed before measuring.
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    let len = value.trim().chars().count();
    let message = match field {
        Field::Title if len == 0 => "Title is required",
        Field::Title if len < TITLE_MIN_LEN => "Title must be at least 3 characters long",
        Field::Title if len > TITLE_MAX_LEN => "Title cannot exceed 200 characters",
        Field::Content if len == 0 => "Content is required",
        Field::Content if len < CONTENT_MIN_LEN => "Content must be at least 10 characters long",
        _ => return None,
    };
    Some(FieldError { field, message })
}

/// Check every field of a draft, in form order.
pub fn validate_draft(draft: &PostDraft) -> Vec<FieldError> {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            let value = match field {
                Field::Title => draft.title.as_str(),
                Field::Content => draft.content.as_str(),
            };
            validate_field(field, value)
        })
        .collect()
}
