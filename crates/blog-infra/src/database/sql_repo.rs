//! SeaORM repository for posts.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

use blog_core::ports::PostRepository;
use blog_core::{NewPost, Post, PostChanges, PostId, RepoError};

use super::entity::post::{self, Entity as PostEntity};
use super::sql_base::{SqlBaseRepository, query_error};

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(count = rows.len(), "Fetched posts");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(query_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let Some(existing) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let updated_at = Post::edited_at(existing.created_at, chrono::Utc::now());
        let mut active: post::ActiveModel = existing.into();
        active.title = Set(changes.title);
        active.content = Set(changes.content);
        if let Some(author) = changes.author {
            active.author = Set(author);
        }
        active.updated_at = Set(updated_at);

        let model = active.update(&self.db).await.map_err(query_error)?;
        Ok(Some(model.into()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(query_error)
    }
}
