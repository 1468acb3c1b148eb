//! Data Transfer Objects - request/response types for the API.

use blog_core::{Post, PostId, PostInput};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts` and `PUT /api/posts/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<PostRequest> for PostInput {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
        }
    }
}

/// A post as it travels over the wire. Timestamps are ISO-8601 in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: format_timestamp(&post.created_at),
            updated_at: format_timestamp(&post.updated_at),
        }
    }
}

impl TryFrom<PostResponse> for Post {
    type Error = chrono::ParseError;

    fn try_from(res: PostResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            id: res.id,
            title: res.title,
            content: res.content,
            author: res.author,
            created_at: parse_timestamp(&res.created_at)?,
            updated_at: parse_timestamp(&res.updated_at)?,
        })
    }
}

/// Response of `DELETE /api/posts/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted_id: PostId,
}

impl DeleteResponse {
    pub fn deleted(id: PostId) -> Self {
        Self {
            success: true,
            message: "Post deleted successfully".to_string(),
            deleted_id: id,
        }
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub posts_count: u64,
}

/// Millisecond-precision RFC 3339 with a `Z` suffix, e.g. `2026-10-19T08:30:00.000Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|at| at.with_timezone(&Utc))
}
