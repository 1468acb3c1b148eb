use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
pub type PostId = i64;

/// Post entity - a titled, authored, timestamped text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Author recorded when a post is created without one.
    pub const DEFAULT_AUTHOR: &'static str = "Anonymous";

    /// Whether the post has been modified since it was created.
    pub fn is_updated(&self) -> bool {
        self.updated_at != self.created_at
    }

    /// `updated_at` for an edit made at `now`, kept at least 1 ms after
    /// `created_at` so it survives millisecond serialization as a change.
    pub fn edited_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(created_at + chrono::Duration::milliseconds(1))
    }
}

/// User-entered title and content, as emitted by the forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Copy with surrounding whitespace removed from both fields.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }
}

/// A post about to be inserted. Fields are already trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Full replacement of title and content; `author: None` keeps the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}
