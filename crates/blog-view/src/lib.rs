//! # Blog View
//!
//! The front end of the blog as a platform-neutral view model.
//!
//! [`BlogView`] owns every piece of UI state (post list, forms, edit modal,
//! delete confirmation, notices) and exposes each surface as a typed
//! element tree. User input comes in as method calls; intents go out to
//! [`ViewObserver`]s. [`BlogController`] is the stock observer that turns
//! intents into [`PostApi`] calls and pushes the results back.

pub mod controller;
pub mod error;
pub mod form;
pub mod markup;
pub mod modal;
pub mod notice;
pub mod observer;
pub mod render;
pub mod view;

#[cfg(feature = "http")]
pub mod api;

#[cfg(feature = "http")]
pub use api::HttpPostApi;
pub use controller::{BlogController, PostApi};
pub use error::ClientError;
pub use form::{FormId, FormState};
pub use markup::{Element, Node};
pub use modal::{Confirmation, EditModal, ModalClick};
pub use notice::Notices;
pub use observer::{ViewEvent, ViewObserver};
pub use view::{BlogView, PostAction};
