//! Intent notification from the view to its collaborators.

use std::rc::Rc;

use blog_core::{PostDraft, PostId};

/// The closed set of intents the view emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ViewInitialized,
    PostCreate(PostDraft),
    PostUpdate { id: PostId, draft: PostDraft },
    PostDelete(PostId),
    PostEdit(PostId),
}

impl ViewEvent {
    /// The event's handler name.
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::ViewInitialized => "onViewInitialized",
            ViewEvent::PostCreate(_) => "onPostCreate",
            ViewEvent::PostUpdate { .. } => "onPostUpdate",
            ViewEvent::PostDelete(_) => "onPostDelete",
            ViewEvent::PostEdit(_) => "onPostEdit",
        }
    }
}

/// A collaborator interested in view intents.
///
/// Every handler defaults to a no-op; implement only the ones you need.
pub trait ViewObserver {
    fn on_view_initialized(&self) {}

    fn on_post_create(&self, _draft: &PostDraft) {}

    fn on_post_update(&self, _id: PostId, _draft: &PostDraft) {}

    fn on_post_delete(&self, _id: PostId) {}

    /// The observer is expected to fetch the post and call
    /// [`BlogView::show_edit_modal`](crate::BlogView::show_edit_modal).
    fn on_post_edit(&self, _id: PostId) {}
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct Observers {
    entries: Vec<Rc<dyn ViewObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Rc<dyn ViewObserver>) {
        self.entries.push(observer);
    }

    /// Remove every registration of this exact observer instance.
    pub fn unsubscribe<O: ViewObserver + ?Sized>(&mut self, observer: &Rc<O>) -> bool {
        let target = Rc::as_ptr(observer).cast::<()>();
        let before = self.entries.len();
        self.entries
            .retain(|entry| Rc::as_ptr(entry).cast::<()>() != target);
        self.entries.len() != before
    }

    pub fn notify(&self, event: &ViewEvent) {
        tracing::debug!(
            event = event.name(),
            observers = self.entries.len(),
            "Notifying observers"
        );

        for observer in &self.entries {
            match event {
                ViewEvent::ViewInitialized => observer.on_view_initialized(),
                ViewEvent::PostCreate(draft) => observer.on_post_create(draft),
                ViewEvent::PostUpdate { id, draft } => observer.on_post_update(*id, draft),
                ViewEvent::PostDelete(id) => observer.on_post_delete(*id),
                ViewEvent::PostEdit(id) => observer.on_post_edit(*id),
            }
        }
    }
}
