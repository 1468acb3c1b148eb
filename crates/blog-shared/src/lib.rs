//! # Blog Shared
//!
//! Wire types shared between the API server and the view client.

pub mod dto;
pub mod response;

pub use dto::{DeleteResponse, HealthResponse, PostRequest, PostResponse};
pub use response::ErrorResponse;
