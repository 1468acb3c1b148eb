//! Builders turning view state into element trees.

use chrono::{DateTime, Utc};

use blog_core::domain::{CONTENT_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN};
use blog_core::{Field, Post};

use crate::form::{FormId, FormState};
use crate::markup::{Element, Node};
use crate::modal::EditModal;
use crate::notice::Notices;

pub const ACTION_EDIT: &str = "edit";
pub const ACTION_DELETE: &str = "delete";

/// en-US short date with time, e.g. `Oct 19, 2026, 03:45 PM`.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// The post-list surface: one card per post, or the empty state.
pub fn post_list(posts: &[Post]) -> Node {
    let container = Element::new("div").id("posts-container");
    if posts.is_empty() {
        return container.child(empty_state()).into();
    }
    container.children(posts.iter().map(post_card)).into()
}

fn empty_state() -> Element {
    Element::new("div")
        .class("no-posts")
        .child(Element::new("h3").text("No blog posts yet"))
        .child(Element::new("p").text("Be the first to create a blog post!"))
}

pub fn post_card(post: &Post) -> Element {
    let meta = Element::new("div")
        .class("post-meta")
        .child(
            Element::new("span")
                .class("post-date")
                .text(format_date(&post.created_at)),
        )
        .maybe_child(
            post.is_updated()
                .then(|| Element::new("span").class("post-updated").text("Updated")),
        );

    Element::new("article")
        .class("post-card")
        .attr("data-post-id", post.id)
        .child(
            Element::new("div")
                .class("post-header")
                .child(Element::new("h2").class("post-title").text(&post.title))
                .child(meta),
        )
        .child(
            Element::new("div")
                .class("post-content")
                .children(content_lines(&post.content)),
        )
        .child(
            Element::new("div")
                .class("post-actions")
                .child(action_button(post, ACTION_EDIT, "btn btn-edit", "Edit"))
                .child(action_button(post, ACTION_DELETE, "btn btn-delete", "Delete")),
        )
}

fn action_button(post: &Post, action: &str, class: &str, label: &str) -> Element {
    Element::new("button")
        .class(class)
        .attr("data-action", action)
        .attr("data-post-id", post.id)
        .text(label)
}

/// Content text with each newline turned into a `<br>`.
fn content_lines(content: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Element::new("br").into());
        }
        if !line.is_empty() {
            nodes.push(Node::text(line));
        }
    }
    nodes
}

/// The inline form; heading, submit label and cancel action follow the mode.
pub fn post_form(form: &FormState, editing: bool) -> Node {
    let actions = Element::new("div")
        .class("form-actions")
        .child(submit_button(if editing { "Update Post" } else { "Create Post" }))
        .maybe_child(editing.then(|| {
            Element::new("button")
                .attr("type", "button")
                .id("cancel-edit")
                .class("btn btn-secondary")
                .text("Cancel Edit")
        }));

    Element::new("div")
        .id("form-container")
        .child(
            Element::new("form")
                .id("post-form")
                .class("post-form")
                .child(Element::new("h3").text(if editing {
                    "Edit Post"
                } else {
                    "Create New Post"
                }))
                .child(field_group(FormId::Post, Field::Title, form))
                .child(field_group(FormId::Post, Field::Content, form))
                .child(actions),
        )
        .into()
}

pub fn edit_modal(modal: &EditModal) -> Node {
    let form = modal.form().map(|form| {
        Element::new("form")
            .id("edit-post-form")
            .class("post-form")
            .child(field_group(FormId::EditModal, Field::Title, form))
            .child(field_group(FormId::EditModal, Field::Content, form))
            .child(
                Element::new("div")
                    .class("form-actions")
                    .child(submit_button("Update Post"))
                    .child(
                        Element::new("button")
                            .attr("type", "button")
                            .id("cancel-edit-modal")
                            .class("btn btn-secondary")
                            .text("Cancel"),
                    ),
            )
    });

    Element::new("div")
        .id("edit-modal")
        .class("modal")
        .shown(modal.is_visible())
        .child(
            Element::new("div")
                .class("modal-content")
                .child(
                    Element::new("div")
                        .class("modal-header")
                        .child(Element::new("h3").text("Edit Post"))
                        .child(
                            Element::new("button")
                                .id("close-edit-modal")
                                .class("modal-close")
                                .text("×"),
                        ),
                )
                .child(
                    Element::new("div")
                        .id("edit-form-container")
                        .maybe_child(form),
                ),
        )
        .into()
}

pub fn delete_modal(visible: bool) -> Node {
    Element::new("div")
        .id("delete-modal")
        .class("modal")
        .shown(visible)
        .child(
            Element::new("div")
                .class("modal-content")
                .child(Element::new("h3").text("Delete Post"))
                .child(Element::new("p").text(
                    "Are you sure you want to delete this post? This action cannot be undone.",
                ))
                .child(
                    Element::new("div")
                        .class("modal-actions")
                        .child(
                            Element::new("button")
                                .id("confirm-delete")
                                .class("btn btn-danger")
                                .text("Delete"),
                        )
                        .child(
                            Element::new("button")
                                .id("cancel-delete")
                                .class("btn btn-secondary")
                                .text("Cancel"),
                        ),
                ),
        )
        .into()
}

/// Loading indicator and the dismissible error banner.
pub fn status(notices: &Notices) -> Node {
    let banner = notices.error().map(|message| {
        Element::new("div")
            .class("error-message")
            .child(Element::new("span").class("error-icon").text("⚠️"))
            .child(Element::new("span").class("error-text").text(message))
            .child(Element::new("button").class("error-close").text("×"))
    });

    Element::new("div")
        .class("status")
        .child(
            Element::new("div")
                .id("loading-indicator")
                .class("loading")
                .shown(notices.is_loading())
                .text("Loading posts..."),
        )
        .child(
            Element::new("div")
                .id("error-container")
                .shown(banner.is_some())
                .maybe_child(banner),
        )
        .into()
}

pub fn toasts(notices: &Notices) -> Node {
    Element::new("div")
        .class("toasts")
        .children(notices.toasts().iter().map(|toast| {
            Element::new("div")
                .class("success-message")
                .child(Element::new("span").class("success-icon").text("✅"))
                .child(
                    Element::new("span")
                        .class("success-text")
                        .text(toast.message.as_str()),
                )
        }))
        .into()
}

fn submit_button(label: &str) -> Element {
    Element::new("button")
        .attr("type", "submit")
        .class("btn btn-primary")
        .text(label)
}

/// Label, input and inline error slot for one field.
fn field_group(id: FormId, field: Field, form: &FormState) -> Element {
    let input_id = format!("{}{}", id.prefix(), field.name());
    let error = form.error(field);

    let input = match field {
        Field::Title => Element::new("input")
            .attr("type", "text")
            .attr("value", form.value(field))
            .attr("placeholder", "Enter post title")
            .attr("minlength", TITLE_MIN_LEN)
            .attr("maxlength", TITLE_MAX_LEN),
        Field::Content => Element::new("textarea")
            .attr("rows", 5)
            .attr("placeholder", "Write your post content here...")
            .attr("minlength", CONTENT_MIN_LEN)
            .text(form.value(field)),
    };
    let mut input = input
        .id(&input_id)
        .attr("name", field.name())
        .attr("required", "");
    if error.is_some() {
        input = input.class("error");
    }
    if form.focused() == Some(field) {
        input = input.attr("autofocus", "");
    }

    let mut error_slot = Element::new("div")
        .id(format!("{}-error", input_id))
        .class(if error.is_some() {
            "error-message visible"
        } else {
            "error-message"
        })
        .shown(error.is_some());
    if let Some(message) = error {
        error_slot = error_slot.text(message);
    }

    Element::new("div")
        .class("form-group")
        .child(
            Element::new("label")
                .attr("for", &input_id)
                .text(match field {
                    Field::Title => "Title",
                    Field::Content => "Content",
                }),
        )
        .child(input)
        .child(error_slot)
}
