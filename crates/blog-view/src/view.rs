//! `BlogView`: the single owner of all front-end state.
//!
//! The host feeds user input in through the `&mut self` methods and paints
//! the surfaces back out. Intents leave only through the observers.

use std::rc::Rc;
use std::time::Instant;

use blog_core::{Field, Post, PostId};

use crate::form::{FormId, FormState};
use crate::markup::{Element, Node};
use crate::modal::{Confirmation, DeleteConfirmation, EditModal, ModalClick};
use crate::notice::Notices;
use crate::observer::{Observers, ViewEvent, ViewObserver};
use crate::render::{self, ACTION_DELETE, ACTION_EDIT};

/// An action button clicked inside the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Edit(PostId),
    Delete(PostId),
}

impl PostAction {
    /// Read the action tag and post id off a clicked element.
    pub fn from_target(target: &Element) -> Option<Self> {
        let id = target.get_attr("data-post-id")?.parse().ok()?;
        match target.get_attr("data-action")? {
            ACTION_EDIT => Some(PostAction::Edit(id)),
            ACTION_DELETE => Some(PostAction::Delete(id)),
            _ => None,
        }
    }
}

pub struct BlogView {
    observers: Observers,
    post_list: Node,
    form: FormState,
    current_edit_id: Option<PostId>,
    edit_modal: EditModal,
    delete: DeleteConfirmation,
    /// Confirmation opened from the list, waiting for the orchestrator to claim it.
    unclaimed_confirmation: Option<Confirmation>,
    notices: Notices,
}

impl Default for BlogView {
    fn default() -> Self {
        Self::new()
    }
}

impl BlogView {
    pub fn new() -> Self {
        Self {
            observers: Observers::new(),
            post_list: render::post_list(&[]),
            form: FormState::new(),
            current_edit_id: None,
            edit_modal: EditModal::Hidden,
            delete: DeleteConfirmation::default(),
            unclaimed_confirmation: None,
            notices: Notices::default(),
        }
    }

    // ── Observers ─────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: Rc<dyn ViewObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn unsubscribe<O: ViewObserver + ?Sized>(&mut self, observer: &Rc<O>) -> bool {
        self.observers.unsubscribe(observer)
    }

    /// Announce that the view is ready for data.
    pub fn initialize(&mut self) {
        tracing::debug!("View initialized");
        self.observers.notify(&ViewEvent::ViewInitialized);
    }

    // ── Rendering ─────────────────────────────────────────────

    /// Replace the post list.
    pub fn render(&mut self, posts: &[Post]) {
        tracing::debug!(count = posts.len(), "Rendering posts");
        self.post_list = render::post_list(posts);
    }

    // ── Status ────────────────────────────────────────────────

    pub fn show_loading(&mut self) {
        self.notices.show_loading();
    }

    pub fn hide_loading(&mut self) {
        self.notices.hide_loading();
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Showing error");
        self.notices.show_error(message);
    }

    pub fn hide_error(&mut self) {
        self.notices.hide_error();
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.notices.show_success(message, Instant::now());
    }

    /// Remove the toasts that have run their course.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        self.notices.dismiss_expired(now)
    }

    // ── Inline form ───────────────────────────────────────────

    /// Load a post into the inline form and switch it to edit mode.
    pub fn populate_form(&mut self, post: &Post) {
        self.form = FormState::from_post(post);
        self.current_edit_id = Some(post.id);
    }

    /// Empty the inline form and return it to create mode.
    pub fn clear_form(&mut self) {
        self.form.reset();
        self.current_edit_id = None;
    }

    pub fn cancel_edit(&mut self) {
        tracing::debug!(post_id = ?self.current_edit_id, "Edit cancelled");
        self.clear_form();
    }

    pub fn set_field(&mut self, form: FormId, field: Field, value: impl Into<String>) {
        if let Some(state) = self.form_state_mut(form) {
            state.set_value(field, value);
        }
    }

    pub fn focus_field(&mut self, form: FormId, field: Field) {
        if let Some(state) = self.form_state_mut(form) {
            state.focus(field);
        }
    }

    /// Field check on focus loss. Returns whether the field is valid.
    pub fn blur_field(&mut self, form: FormId, field: Field) -> bool {
        self.form_state_mut(form)
            .is_some_and(|state| state.blur(field))
    }

    /// Validate and submit one of the forms. Returns whether an intent was emitted.
    pub fn submit_form(&mut self, form: FormId) -> bool {
        match form {
            FormId::Post => self.submit_post_form(),
            FormId::EditModal => self.submit_edit_form(),
        }
    }

    fn submit_post_form(&mut self) -> bool {
        let draft = match self.form.submit() {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "Post form rejected");
                return false;
            }
        };

        let event = match self.current_edit_id {
            Some(id) => ViewEvent::PostUpdate { id, draft },
            None => ViewEvent::PostCreate(draft),
        };
        self.observers.notify(&event);
        true
    }

    fn form_state_mut(&mut self, form: FormId) -> Option<&mut FormState> {
        match form {
            FormId::Post => Some(&mut self.form),
            FormId::EditModal => self.edit_modal.form_mut(),
        }
    }

    // ── Edit modal ────────────────────────────────────────────

    pub fn show_edit_modal(&mut self, post: &Post) {
        tracing::debug!(post_id = post.id, "Opening edit modal");
        self.edit_modal.show(post);
        self.current_edit_id = Some(post.id);
    }

    pub fn hide_edit_modal(&mut self) {
        if self.edit_modal.is_visible() {
            tracing::debug!(post_id = ?self.edit_modal.post_id(), "Closing edit modal");
        }
        self.edit_modal.hide();
        self.current_edit_id = None;
    }

    /// Submit the modal's form. On success the modal closes and an update is emitted.
    pub fn submit_edit_form(&mut self) -> bool {
        let Some(id) = self.edit_modal.post_id() else {
            return false;
        };
        let Some(form) = self.edit_modal.form_mut() else {
            return false;
        };
        let draft = match form.submit() {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!(post_id = id, errors = errors.len(), "Edit form rejected");
                return false;
            }
        };

        self.hide_edit_modal();
        self.observers.notify(&ViewEvent::PostUpdate { id, draft });
        true
    }

    pub fn cancel_edit_modal(&mut self) {
        self.hide_edit_modal();
    }

    pub fn close_edit_modal(&mut self) {
        self.hide_edit_modal();
    }

    /// Clicks on the backdrop close the modal; clicks inside the dialog do not.
    pub fn click_edit_modal(&mut self, target: ModalClick) {
        if target == ModalClick::Backdrop {
            self.hide_edit_modal();
        }
    }

    // ── Post list actions ─────────────────────────────────────

    /// The one listener for every card action in the list.
    pub fn handle_posts_click(&mut self, target: &Element) -> Option<PostAction> {
        let action = PostAction::from_target(target)?;
        match action {
            PostAction::Edit(id) => self.observers.notify(&ViewEvent::PostEdit(id)),
            PostAction::Delete(id) => {
                self.unclaimed_confirmation = Some(self.show_delete_confirmation(id));
                self.observers.notify(&ViewEvent::PostDelete(id));
            }
        }
        Some(action)
    }

    // ── Delete confirmation ───────────────────────────────────

    /// Open the confirmation modal for a post.
    pub fn show_delete_confirmation(&mut self, post_id: PostId) -> Confirmation {
        self.delete.open(post_id)
    }

    /// Confirmation opened by the last delete click, if nobody claimed it yet.
    pub fn take_delete_confirmation(&mut self) -> Option<Confirmation> {
        self.unclaimed_confirmation.take()
    }

    pub fn confirm_delete(&mut self) -> Option<PostId> {
        self.delete.resolve(true)
    }

    pub fn cancel_delete(&mut self) -> Option<PostId> {
        self.delete.resolve(false)
    }

    // ── State ─────────────────────────────────────────────────

    pub fn current_edit_id(&self) -> Option<PostId> {
        self.current_edit_id
    }

    pub fn pending_delete_id(&self) -> Option<PostId> {
        self.delete.pending_id()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn edit_modal(&self) -> &EditModal {
        &self.edit_modal
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    // ── Surfaces ──────────────────────────────────────────────

    pub fn posts_surface(&self) -> &Node {
        &self.post_list
    }

    pub fn form_surface(&self) -> Node {
        render::post_form(&self.form, self.current_edit_id.is_some())
    }

    pub fn edit_modal_surface(&self) -> Node {
        render::edit_modal(&self.edit_modal)
    }

    pub fn delete_modal_surface(&self) -> Node {
        render::delete_modal(self.delete.is_open())
    }

    pub fn status_surface(&self) -> Node {
        render::status(&self.notices)
    }

    pub fn toasts_surface(&self) -> Node {
        render::toasts(&self.notices)
    }

    /// Every surface composed into one page.
    pub fn render_page(&self) -> Node {
        Element::new("main")
            .class("blog-app")
            .child(self.status_surface())
            .child(self.form_surface())
            .child(self.post_list.clone())
            .child(self.edit_modal_surface())
            .child(self.delete_modal_surface())
            .child(self.toasts_surface())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use blog_core::PostDraft;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::notice::SUCCESS_TOAST_DURATION;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<ViewEvent>>,
    }

    impl ViewObserver for Recorder {
        fn on_view_initialized(&self) {
            self.events.borrow_mut().push(ViewEvent::ViewInitialized);
        }

        fn on_post_create(&self, draft: &PostDraft) {
            self.events.borrow_mut().push(ViewEvent::PostCreate(draft.clone()));
        }

        fn on_post_update(&self, id: PostId, draft: &PostDraft) {
            self.events.borrow_mut().push(ViewEvent::PostUpdate {
                id,
                draft: draft.clone(),
            });
        }

        fn on_post_delete(&self, id: PostId) {
            self.events.borrow_mut().push(ViewEvent::PostDelete(id));
        }

        fn on_post_edit(&self, id: PostId) {
            self.events.borrow_mut().push(ViewEvent::PostEdit(id));
        }
    }

    impl Recorder {
        fn take(&self) -> Vec<ViewEvent> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    fn view_with_recorder() -> (BlogView, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let mut view = BlogView::new();
        view.subscribe(recorder.clone());
        (view, recorder)
    }

    fn post(id: PostId, title: &str, content: &str) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: title.into(),
            content: content.into(),
            author: "Anonymous".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn fill(view: &mut BlogView, form: FormId, title: &str, content: &str) {
        view.set_field(form, Field::Title, title);
        view.set_field(form, Field::Content, content);
    }

    fn action_button(view: &BlogView, action: &str, id: PostId) -> Element {
        let id = id.to_string();
        view.posts_surface()
            .find_all(|e| {
                e.get_attr("data-action") == Some(action)
                    && e.get_attr("data-post-id") == Some(id.as_str())
            })
            .into_iter()
            .next()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_initialize_notifies_observers() {
        let (mut view, recorder) = view_with_recorder();
        view.initialize();
        assert_eq!(recorder.take(), vec![ViewEvent::ViewInitialized]);
    }

    #[test]
    fn test_valid_submit_emits_one_create_with_trimmed_values() {
        let (mut view, recorder) = view_with_recorder();
        fill(&mut view, FormId::Post, "   Hello World ", "\n This is long enough.  ");

        assert!(view.submit_form(FormId::Post));
        assert_eq!(
            recorder.take(),
            vec![ViewEvent::PostCreate(PostDraft::new(
                "Hello World",
                "This is long enough."
            ))]
        );
    }

    #[test]
    fn test_submit_in_edit_mode_emits_update() {
        let (mut view, recorder) = view_with_recorder();
        view.populate_form(&post(9, "Old title", "Old content here"));
        view.set_field(FormId::Post, Field::Title, " New title ");

        assert!(view.submit_form(FormId::Post));
        assert_eq!(
            recorder.take(),
            vec![ViewEvent::PostUpdate {
                id: 9,
                draft: PostDraft::new("New title", "Old content here"),
            }]
        );
    }

    #[test]
    fn test_invalid_submit_emits_nothing() {
        let long_title = "x".repeat(201);
        let cases = [
            ("ab", "This is long enough.", Field::Title),
            ("   ab   ", "This is long enough.", Field::Title),
            (long_title.as_str(), "This is long enough.", Field::Title),
            ("Valid title", "too short", Field::Content),
            ("Valid title", "   123456789   ", Field::Content),
        ];

        for (title, content, failing) in cases {
            let (mut view, recorder) = view_with_recorder();
            fill(&mut view, FormId::Post, title, content);

            assert!(!view.submit_form(FormId::Post));
            assert!(recorder.take().is_empty());
            assert!(view.form().error(failing).is_some(), "{title:?} / {content:?}");
            assert_eq!(view.form().focused(), Some(failing));
        }
    }

    #[test]
    fn test_errors_are_visible_on_the_form_surface() {
        let (mut view, _) = view_with_recorder();
        fill(&mut view, FormId::Post, "Hi", "This is long enough.");
        view.submit_form(FormId::Post);

        let surface = view.form_surface();
        let slot = surface.find_by_id("title-error").unwrap();
        assert!(!slot.is_hidden());
        assert!(surface.find_by_id("title").unwrap().has_class("error"));
        assert!(surface.find_by_id("content-error").unwrap().is_hidden());
    }

    #[test]
    fn test_create_with_short_values_is_rejected() {
        let (mut view, recorder) = view_with_recorder();
        fill(&mut view, FormId::Post, "Hi", "Short");

        assert!(!view.submit_form(FormId::Post));
        assert!(recorder.take().is_empty());
        assert_eq!(
            view.form().error(Field::Title),
            Some("Title must be at least 3 characters long")
        );
        // "Short" is under the content minimum as well
        assert_eq!(
            view.form().error(Field::Content),
            Some("Content must be at least 10 characters long")
        );
        assert_eq!(view.form().focused(), Some(Field::Title));

        fill(&mut view, FormId::Post, "Hello World", "This is long enough.");
        assert!(view.submit_form(FormId::Post));
        assert_eq!(
            recorder.take(),
            vec![ViewEvent::PostCreate(PostDraft::new(
                "Hello World",
                "This is long enough."
            ))]
        );
    }

    #[test]
    fn test_render_escapes_user_text() {
        let (mut view, _) = view_with_recorder();
        view.render(&[post(1, "<script>alert(1)</script>", "<b>bold</b> & more")]);

        let html = view.posts_surface().to_html();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
    }

    #[test]
    fn test_render_empty_and_non_empty() {
        let (mut view, _) = view_with_recorder();
        view.render(&[post(1, "First", "Some content here")]);
        assert_eq!(view.posts_surface().find_by_class("post-card").len(), 1);

        view.render(&[]);
        assert!(view.posts_surface().find_by_class("post-card").is_empty());
        assert_eq!(view.posts_surface().find_by_class("no-posts").len(), 1);
    }

    #[test]
    fn test_updated_badge() {
        let (mut view, _) = view_with_recorder();
        let same = post(1, "Same", "Never edited here");
        let mut edited = post(2, "Edited", "Edited once here");
        edited.updated_at = edited.created_at + Duration::seconds(5);

        view.render(&[same, edited]);
        let cards = view.posts_surface().find_by_class("post-card");
        let badge_count = |card: &Element| {
            Node::Element(card.clone())
                .find_by_class("post-updated")
                .len()
        };
        assert_eq!(badge_count(cards[0]), 0);
        assert_eq!(badge_count(cards[1]), 1);
    }

    #[test]
    fn test_delete_flow_confirm() {
        let (mut view, recorder) = view_with_recorder();
        view.render(&[post(7, "Doomed", "About to be deleted")]);

        let button = action_button(&view, "delete", 7);
        assert_eq!(view.handle_posts_click(&button), Some(PostAction::Delete(7)));

        assert_eq!(view.pending_delete_id(), Some(7));
        assert!(!view.delete_modal_surface().as_element().unwrap().is_hidden());
        assert_eq!(recorder.take(), vec![ViewEvent::PostDelete(7)]);

        let mut confirmation = view.take_delete_confirmation().unwrap();
        assert_eq!(confirmation.post_id(), 7);
        assert_eq!(confirmation.try_outcome(), None);

        assert_eq!(view.confirm_delete(), Some(7));
        assert_eq!(confirmation.try_outcome(), Some(true));
        assert_eq!(view.pending_delete_id(), None);
        assert!(view.delete_modal_surface().as_element().unwrap().is_hidden());
    }

    #[tokio::test]
    async fn test_delete_flow_cancel() {
        let (mut view, _) = view_with_recorder();
        let confirmation = view.show_delete_confirmation(7);
        assert_eq!(view.pending_delete_id(), Some(7));

        assert_eq!(view.cancel_delete(), Some(7));
        assert!(!confirmation.await);
        assert_eq!(view.pending_delete_id(), None);
        assert!(view.delete_modal_surface().as_element().unwrap().is_hidden());
    }

    #[test]
    fn test_second_delete_replaces_pending() {
        let (mut view, _) = view_with_recorder();
        view.render(&[post(1, "One", "First content"), post(2, "Two", "Second content")]);

        view.handle_posts_click(&action_button(&view, "delete", 1));
        let mut first = view.take_delete_confirmation().unwrap();
        view.handle_posts_click(&action_button(&view, "delete", 2));

        assert_eq!(first.try_outcome(), Some(false));
        assert_eq!(view.pending_delete_id(), Some(2));
    }

    #[test]
    fn test_edit_click_emits_edit_intent() {
        let (mut view, recorder) = view_with_recorder();
        view.render(&[post(3, "Title", "Some content here")]);

        let button = action_button(&view, "edit", 3);
        assert_eq!(view.handle_posts_click(&button), Some(PostAction::Edit(3)));
        assert_eq!(recorder.take(), vec![ViewEvent::PostEdit(3)]);

        // clicks that are not actions are ignored
        let card = view.posts_surface().find_by_class("post-card")[0].clone();
        assert_eq!(view.handle_posts_click(&card), None);
    }

    #[test]
    fn test_edit_modal_populates_and_hides_without_update() {
        let closers: [fn(&mut BlogView); 3] = [
            BlogView::cancel_edit_modal,
            BlogView::close_edit_modal,
            |view| view.click_edit_modal(ModalClick::Backdrop),
        ];

        for close in closers {
            let (mut view, recorder) = view_with_recorder();
            view.show_edit_modal(&post(5, "T", "C"));

            assert_eq!(view.current_edit_id(), Some(5));
            let surface = view.edit_modal_surface();
            assert!(!surface.as_element().unwrap().is_hidden());
            assert_eq!(
                surface.find_by_id("edit-title").unwrap().get_attr("value"),
                Some("T")
            );
            assert_eq!(
                Node::Element(surface.find_by_id("edit-content").unwrap().clone()).text_content(),
                "C"
            );

            view.click_edit_modal(ModalClick::Content);
            assert!(view.edit_modal().is_visible());

            close(&mut view);
            assert!(!view.edit_modal().is_visible());
            assert_eq!(view.current_edit_id(), None);
            assert!(recorder.take().is_empty());
        }
    }

    #[test]
    fn test_edit_modal_title_is_escaped_in_markup() {
        let (mut view, _) = view_with_recorder();
        view.show_edit_modal(&post(5, "\"><script>", "Content here ok"));

        let html = view.edit_modal_surface().to_html();
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_edit_modal_submit() {
        let (mut view, recorder) = view_with_recorder();
        view.show_edit_modal(&post(5, "T", "C"));

        // invalid values keep the modal open
        assert!(!view.submit_form(FormId::EditModal));
        assert!(view.edit_modal().is_visible());
        assert!(view.edit_modal().form().unwrap().has_errors());
        assert!(recorder.take().is_empty());

        fill(&mut view, FormId::EditModal, " Better title ", "Much better content");
        assert!(view.submit_form(FormId::EditModal));
        assert!(!view.edit_modal().is_visible());
        assert_eq!(view.current_edit_id(), None);
        assert_eq!(
            recorder.take(),
            vec![ViewEvent::PostUpdate {
                id: 5,
                draft: PostDraft::new("Better title", "Much better content"),
            }]
        );
    }

    #[test]
    fn test_blur_on_edit_modal_form() {
        let (mut view, _) = view_with_recorder();
        // no modal, nothing to validate
        assert!(!view.blur_field(FormId::EditModal, Field::Title));

        view.show_edit_modal(&post(5, "T", "Content here ok"));
        assert!(!view.blur_field(FormId::EditModal, Field::Title));
        assert!(view.blur_field(FormId::EditModal, Field::Content));
        assert!(
            !view
                .edit_modal_surface()
                .find_by_id("edit-title-error")
                .unwrap()
                .is_hidden()
        );
    }

    #[test]
    fn test_form_mode_follows_current_edit_id() {
        let (mut view, _) = view_with_recorder();
        assert!(view.form_surface().text_content().contains("Create New Post"));

        view.populate_form(&post(4, "Title", "Content here ok"));
        let surface = view.form_surface();
        assert!(surface.text_content().contains("Update Post"));
        assert!(surface.find_by_id("cancel-edit").is_some());

        view.cancel_edit();
        assert_eq!(view.current_edit_id(), None);
        assert_eq!(view.form().value(Field::Title), "");
        assert!(view.form_surface().find_by_id("cancel-edit").is_none());
    }

    #[test]
    fn test_status_surfaces() {
        let (mut view, _) = view_with_recorder();
        view.show_error("Failed to load posts");
        assert!(!view.status_surface().find_by_id("error-container").unwrap().is_hidden());

        view.show_loading();
        let status = view.status_surface();
        assert!(!status.find_by_id("loading-indicator").unwrap().is_hidden());
        assert!(status.find_by_id("error-container").unwrap().is_hidden());

        view.hide_loading();
        view.show_success("Post created successfully!");
        assert_eq!(view.toasts_surface().find_by_class("success-message").len(), 1);

        assert_eq!(view.dismiss_expired(Instant::now() + SUCCESS_TOAST_DURATION), 1);
        assert!(view.toasts_surface().find_by_class("success-message").is_empty());
    }

    #[test]
    fn test_unsubscribed_observer_hears_nothing() {
        let (mut view, recorder) = view_with_recorder();
        assert!(view.unsubscribe(&recorder));

        view.initialize();
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_independent_instances() {
        let (mut first, _) = view_with_recorder();
        let (second, _) = view_with_recorder();

        first.show_edit_modal(&post(1, "Title", "Content here ok"));
        assert_eq!(first.current_edit_id(), Some(1));
        assert_eq!(second.current_edit_id(), None);
    }

    #[test]
    fn test_render_page_contains_every_surface() {
        let view = BlogView::new();
        let page = view.render_page();
        for id in [
            "loading-indicator",
            "error-container",
            "form-container",
            "posts-container",
            "edit-modal",
            "delete-modal",
        ] {
            assert!(page.find_by_id(id).is_some(), "missing {id}");
        }
    }
}
