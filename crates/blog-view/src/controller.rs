//! Orchestration between the view and the posts API.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use blog_core::{Post, PostDraft, PostId};

use crate::error::ClientError;
use crate::modal::Confirmation;
use crate::observer::{ViewEvent, ViewObserver};
use crate::view::BlogView;

/// Transport to the posts API.
#[async_trait]
pub trait PostApi: Send + Sync {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError>;

    async fn get_post(&self, id: PostId) -> Result<Post, ClientError>;

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, ClientError>;

    async fn update_post(&self, id: PostId, draft: &PostDraft) -> Result<Post, ClientError>;

    async fn delete_post(&self, id: PostId) -> Result<(), ClientError>;
}

/// Queues every view intent for the controller to pick up.
struct ChannelObserver {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ChannelObserver {
    fn forward(&self, event: ViewEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Controller gone, dropping view intent");
        }
    }
}

impl ViewObserver for ChannelObserver {
    fn on_view_initialized(&self) {
        self.forward(ViewEvent::ViewInitialized);
    }

    fn on_post_create(&self, draft: &PostDraft) {
        self.forward(ViewEvent::PostCreate(draft.clone()));
    }

    fn on_post_update(&self, id: PostId, draft: &PostDraft) {
        self.forward(ViewEvent::PostUpdate {
            id,
            draft: draft.clone(),
        });
    }

    fn on_post_delete(&self, id: PostId) {
        self.forward(ViewEvent::PostDelete(id));
    }

    fn on_post_edit(&self, id: PostId) {
        self.forward(ViewEvent::PostEdit(id));
    }
}

/// Drives the API in response to view intents and pushes results back.
///
/// Intents queue up as the user interacts; [`drain`](Self::drain) works
/// through them. A delete waits on its confirmation without blocking: each
/// drain checks whether the user has answered yet.
pub struct BlogController {
    view: BlogView,
    api: Arc<dyn PostApi>,
    intents: mpsc::UnboundedReceiver<ViewEvent>,
    awaiting_delete: Option<Confirmation>,
}

impl BlogController {
    pub fn new(mut view: BlogView, api: Arc<dyn PostApi>) -> Self {
        let (tx, intents) = mpsc::unbounded_channel();
        view.subscribe(Rc::new(ChannelObserver { tx }));
        Self {
            view,
            api,
            intents,
            awaiting_delete: None,
        }
    }

    pub fn view(&self) -> &BlogView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut BlogView {
        &mut self.view
    }

    /// Initialize the view and load the first page of posts.
    pub async fn start(&mut self) {
        self.view.initialize();
        self.drain().await;
    }

    /// Handle every queued intent and settle an answered delete confirmation.
    /// Returns how many intents were handled.
    pub async fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.intents.try_recv() {
            self.handle(event).await;
            handled += 1;
        }
        self.settle_delete().await;
        handled
    }

    async fn handle(&mut self, event: ViewEvent) {
        tracing::debug!(event = event.name(), "Handling view intent");
        match event {
            ViewEvent::ViewInitialized => self.load_posts().await,
            ViewEvent::PostCreate(draft) => self.create_post(draft).await,
            ViewEvent::PostUpdate { id, draft } => self.update_post(id, draft).await,
            ViewEvent::PostEdit(id) => self.edit_post(id).await,
            ViewEvent::PostDelete(id) => {
                // a later click may already have replaced this confirmation
                if let Some(confirmation) = self.view.take_delete_confirmation() {
                    self.awaiting_delete = Some(confirmation);
                } else if self.awaiting_delete.is_none() {
                    tracing::warn!(post_id = id, "Delete intent without a confirmation");
                }
            }
        }
    }

    async fn load_posts(&mut self) {
        self.view.show_loading();
        let result = self.api.list_posts().await;
        self.view.hide_loading();

        match result {
            Ok(posts) => self.view.render(&posts),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load posts");
                self.view.show_error(format!("Failed to load posts: {}", e));
            }
        }
    }

    async fn create_post(&mut self, draft: PostDraft) {
        match self.api.create_post(&draft).await {
            Ok(post) => {
                tracing::info!(post_id = post.id, "Post created");
                self.view.show_success("Post created successfully!");
                self.view.clear_form();
                self.load_posts().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create post");
                self.view.show_error(format!("Failed to create post: {}", e));
            }
        }
    }

    async fn update_post(&mut self, id: PostId, draft: PostDraft) {
        match self.api.update_post(id, &draft).await {
            Ok(_) => {
                tracing::info!(post_id = id, "Post updated");
                self.view.show_success("Post updated successfully!");
                self.view.clear_form();
                self.load_posts().await;
            }
            Err(e) => {
                tracing::error!(post_id = id, error = %e, "Failed to update post");
                self.view.show_error(format!("Failed to update post: {}", e));
            }
        }
    }

    async fn edit_post(&mut self, id: PostId) {
        match self.api.get_post(id).await {
            Ok(post) => self.view.show_edit_modal(&post),
            Err(ClientError::NotFound) => self.view.show_error("Post not found"),
            Err(e) => {
                tracing::error!(post_id = id, error = %e, "Failed to load post");
                self.view.show_error(format!("Failed to load post: {}", e));
            }
        }
    }

    async fn settle_delete(&mut self) {
        let Some(confirmation) = self.awaiting_delete.as_mut() else {
            return;
        };
        let Some(confirmed) = confirmation.try_outcome() else {
            return;
        };
        let id = confirmation.post_id();
        self.awaiting_delete = None;

        if !confirmed {
            tracing::debug!(post_id = id, "Delete cancelled");
            return;
        }

        match self.api.delete_post(id).await {
            Ok(()) => {
                tracing::info!(post_id = id, "Post deleted");
                self.view.show_success("Post deleted successfully!");
                self.load_posts().await;
            }
            Err(e) => {
                tracing::error!(post_id = id, error = %e, "Failed to delete post");
                self.view.show_error(format!("Failed to delete post: {}", e));
            }
        }
    }
}
