//! Error body returned by every failing endpoint: `{"error": "..."}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A human-readable explanation of the failure.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn invalid_id() -> Self {
        Self::new("Invalid post ID")
    }

    pub fn not_found() -> Self {
        Self::new("Post not found")
    }

    pub fn internal_error(action: &str) -> Self {
        Self::new(format!("Failed to {}", action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_error_object() {
        let body = serde_json::to_value(ErrorResponse::not_found()).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Post not found" }));
    }
}
