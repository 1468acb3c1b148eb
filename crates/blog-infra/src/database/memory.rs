//! In-memory post repository - used when no database is configured.
//!
//! Works within a single process only.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::ports::{BaseRepository, PostRepository};
use blog_core::{NewPost, Post, PostChanges, PostId, RepoError};

struct Store {
    posts: BTreeMap<PostId, Post>,
    next_id: PostId,
}

/// Post repository backed by a `BTreeMap` with async RwLock.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                posts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let post = Post {
            id,
            title: new_post.title,
            content: new_post.content,
            author: new_post.author,
            created_at: now,
            updated_at: now,
        };
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };

        post.title = changes.title;
        post.content = changes.content;
        if let Some(author) = changes.author {
            post.author = author;
        }
        post.updated_at = Post::edited_at(post.created_at, Utc::now());
        Ok(Some(post.clone()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.posts.len() as u64)
    }
}
