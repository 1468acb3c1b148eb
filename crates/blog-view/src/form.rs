//! Post form state and its validation pipeline.

use std::collections::BTreeMap;

use blog_core::domain::{validate_draft, validate_field};
use blog_core::{Field, FieldError, Post, PostDraft};

/// Which of the two forms an input event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    /// The inline create/edit form.
    Post,
    /// The form inside the edit modal.
    EditModal,
}

impl FormId {
    /// Prefix of the element ids of this form's inputs.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            FormId::Post => "",
            FormId::EditModal => "edit-",
        }
    }
}

/// Raw field values plus the errors currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    title: String,
    content: String,
    errors: BTreeMap<Field, &'static str>,
    focused: Option<Field>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with a post's title and content.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
        }
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Content => self.content = value,
        }
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    /// Field-level check run when an input loses focus. Returns whether it passed.
    pub fn blur(&mut self, field: Field) -> bool {
        if self.focused == Some(field) {
            self.focused = None;
        }
        match validate_field(field, self.value(field)) {
            Some(error) => {
                self.errors.insert(field, error.message);
                false
            }
            None => {
                self.errors.remove(&field);
                true
            }
        }
    }

    /// Whole-form check run on submit.
    ///
    /// On success returns the trimmed draft. On failure every violated field
    /// carries its message and the first one in form order takes focus.
    pub fn submit(&mut self) -> Result<PostDraft, Vec<FieldError>> {
        self.clear_errors();

        let draft = PostDraft::new(self.title.as_str(), self.content.as_str()).trimmed();
        let errors = validate_draft(&draft);
        if errors.is_empty() {
            return Ok(draft);
        }

        for error in &errors {
            self.errors.insert(error.field, error.message);
        }
        self.focused = errors.first().map(|e| e.field);
        Err(errors)
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Empty both fields and drop all errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
