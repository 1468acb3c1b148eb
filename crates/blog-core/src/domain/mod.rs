//! Domain entities - the core business objects.

mod post;
mod validation;

pub use post::{NewPost, Post, PostChanges, PostDraft, PostId};
pub use validation::{
    CONTENT_MIN_LEN, Field, FieldError, TITLE_MAX_LEN, TITLE_MIN_LEN, validate_draft,
    validate_field,
};
