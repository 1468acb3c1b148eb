//! Post use-cases: input normalization and validation in front of the repository.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges, PostDraft, PostId, validate_draft};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Raw create/update input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// Posts inserted into an empty store on first start.
const SEED_POSTS: [(&str, &str, &str); 2] = [
    (
        "Welcome to My Blog",
        "This is my first blog post! I'm excited to share my thoughts and experiences with you.",
        "Blog Owner",
    ),
    (
        "Getting Started with MVC",
        "MVC (Model-View-Controller) is a software design pattern that separates an application into three interconnected components.",
        "Developer",
    ),
];

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_recent().await?)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo.find_by_id(id).await?.ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = Self::checked_draft(&input)?;
        let author = Self::normalized_author(input.author)
            .unwrap_or_else(|| Post::DEFAULT_AUTHOR.to_string());

        let post = self
            .repo
            .insert(NewPost {
                title: draft.title,
                content: draft.content,
                author,
            })
            .await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub async fn update(&self, id: PostId, input: PostInput) -> Result<Post, DomainError> {
        let draft = Self::checked_draft(&input)?;
        let changes = PostChanges {
            title: draft.title,
            content: draft.content,
            author: Self::normalized_author(input.author),
        };

        let post = self
            .repo
            .update(id, changes)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;
        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: "Post",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.repo.count().await?)
    }

    /// Insert the starter posts when the store is empty. Returns how many were added.
    pub async fn seed_if_empty(&self) -> Result<usize, DomainError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            tracing::info!(count = existing, "Found existing posts");
            return Ok(0);
        }

        for (title, content, author) in SEED_POSTS {
            self.repo
                .insert(NewPost {
                    title: title.to_string(),
                    content: content.to_string(),
                    author: author.to_string(),
                })
                .await?;
        }
        tracing::info!(count = SEED_POSTS.len(), "Added initial blog posts");
        Ok(SEED_POSTS.len())
    }

    fn checked_draft(input: &PostInput) -> Result<PostDraft, DomainError> {
        let (Some(title), Some(content)) = (input.title.as_deref(), input.content.as_deref())
        else {
            return Err(DomainError::MissingFields);
        };
        if title.is_empty() || content.is_empty() {
            return Err(DomainError::MissingFields);
        }

        let draft = PostDraft::new(title, content).trimmed();
        match validate_draft(&draft).into_iter().next() {
            Some(error) => Err(DomainError::Validation(error)),
            None => Ok(draft),
        }
    }

    fn normalized_author(author: Option<String>) -> Option<String> {
        author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
    }
}
