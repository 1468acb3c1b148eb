//! Loading indicator, error banner and success toasts.

use std::time::{Duration, Instant};

/// How long a success toast stays on screen.
pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    loading: bool,
    error: Option<String>,
    toasts: Vec<Toast>,
}

impl Notices {
    /// Show the loading indicator. Any error banner is dismissed.
    pub fn show_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn hide_loading(&mut self) {
        self.loading = false;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    pub fn show_success(&mut self, message: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            expires_at: now + SUCCESS_TOAST_DURATION,
        });
    }

    /// Drop toasts whose time is up. Returns how many were removed.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        before - self.toasts.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
