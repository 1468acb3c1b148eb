use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Generic repository trait for keyed lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` when no row was affected.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, newest-created first (ties broken by descending id).
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a post; the store assigns `id` and both timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace title/content (and author when given), refreshing `updated_at`.
    /// Returns `None` if the post does not exist.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;
}
