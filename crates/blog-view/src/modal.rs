//! The edit modal and the delete-confirmation modal.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use blog_core::{Post, PostId};

use crate::form::FormState;

/// Edit modal: hidden, or visible with a form populated from one post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditModal {
    #[default]
    Hidden,
    Visible { post_id: PostId, form: FormState },
}

impl EditModal {
    pub fn show(&mut self, post: &Post) {
        *self = EditModal::Visible {
            post_id: post.id,
            form: FormState::from_post(post),
        };
    }

    /// Hide the modal, discarding the form and any errors on it.
    pub fn hide(&mut self) {
        *self = EditModal::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, EditModal::Visible { .. })
    }

    pub fn post_id(&self) -> Option<PostId> {
        match self {
            EditModal::Visible { post_id, .. } => Some(*post_id),
            EditModal::Hidden => None,
        }
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            EditModal::Visible { form, .. } => Some(form),
            EditModal::Hidden => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            EditModal::Visible { form, .. } => Some(form),
            EditModal::Hidden => None,
        }
    }
}

/// Where a click on the open edit modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    /// The scrim around the dialog.
    Backdrop,
    /// Anywhere inside the dialog.
    Content,
}

/// Outcome of a delete confirmation, delivered exactly once.
///
/// Resolves to `true` on confirm and `false` on cancel. A confirmation
/// that is superseded or whose modal goes away also resolves to `false`.
#[derive(Debug)]
pub struct Confirmation {
    post_id: PostId,
    rx: oneshot::Receiver<bool>,
}

impl Confirmation {
    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    /// Non-blocking check; `None` while the user has not answered yet.
    pub fn try_outcome(&mut self) -> Option<bool> {
        match self.rx.try_recv() {
            Ok(confirmed) => Some(confirmed),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(false),
        }
    }
}

impl Future for Confirmation {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(false))
    }
}

#[derive(Debug)]
struct Pending {
    post_id: PostId,
    resolve: oneshot::Sender<bool>,
}

/// Delete confirmation: idle, or awaiting an answer for one post.
///
/// Holds a single slot. Opening a new confirmation while one is pending
/// resolves the old one with `false` and takes its place.
#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    pending: Option<Pending>,
}

impl DeleteConfirmation {
    pub fn open(&mut self, post_id: PostId) -> Confirmation {
        if let Some(previous) = self.pending.take() {
            tracing::warn!(
                superseded = previous.post_id,
                post_id,
                "Delete confirmation replaced while pending"
            );
            let _ = previous.resolve.send(false);
        }

        let (resolve, rx) = oneshot::channel();
        self.pending = Some(Pending { post_id, resolve });
        tracing::debug!(post_id, "Awaiting delete confirmation");
        Confirmation { post_id, rx }
    }

    /// Answer the pending confirmation and return to idle.
    /// Returns the post id that was pending, if any.
    pub fn resolve(&mut self, confirmed: bool) -> Option<PostId> {
        let pending = self.pending.take()?;
        // the receiver may already be gone; the answer is then moot
        let _ = pending.resolve.send(confirmed);
        tracing::debug!(post_id = pending.post_id, confirmed, "Delete confirmation resolved");
        Some(pending.post_id)
    }

    pub fn pending_id(&self) -> Option<PostId> {
        self.pending.as_ref().map(|p| p.post_id)
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}
