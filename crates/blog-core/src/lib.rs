//! # Blog Core
//!
//! The domain layer of the blog service.
//! This crate contains the post model, its validation rules and the
//! repository port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{Field, FieldError, NewPost, Post, PostChanges, PostDraft, PostId};
pub use error::{DomainError, RepoError};
pub use service::{PostInput, PostService};
