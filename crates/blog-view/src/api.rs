//! `PostApi` over HTTP against the REST endpoints under `/api/posts`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use blog_core::{Post, PostDraft, PostId};
use blog_shared::{DeleteResponse, ErrorResponse, PostRequest, PostResponse};

use crate::controller::PostApi;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct HttpPostApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostApi {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/api/posts", self.base_url)
    }

    fn post_url(&self, id: PostId) -> String {
        format!("{}/api/posts/{}", self.base_url, id)
    }

    /// Map error statuses to [`ClientError`] and decode the body otherwise.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP error! status: {}", status.as_u16()),
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn request_body(draft: &PostDraft) -> PostRequest {
    PostRequest {
        title: Some(draft.title.clone()),
        content: Some(draft.content.clone()),
        author: None,
    }
}

#[async_trait]
impl PostApi for HttpPostApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        tracing::debug!("Fetching posts");
        let response = self.client.get(self.posts_url()).send().await?;
        let posts: Vec<PostResponse> = Self::handle_response(response).await?;

        posts
            .into_iter()
            .map(|post| Post::try_from(post).map_err(ClientError::from))
            .collect()
    }

    async fn get_post(&self, id: PostId) -> Result<Post, ClientError> {
        let response = self.client.get(self.post_url(id)).send().await?;
        let post: PostResponse = Self::handle_response(response).await?;
        Ok(Post::try_from(post)?)
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, ClientError> {
        let response = self
            .client
            .post(self.posts_url())
            .json(&request_body(draft))
            .send()
            .await?;
        let post: PostResponse = Self::handle_response(response).await?;
        Ok(Post::try_from(post)?)
    }

    async fn update_post(&self, id: PostId, draft: &PostDraft) -> Result<Post, ClientError> {
        let response = self
            .client
            .put(self.post_url(id))
            .json(&request_body(draft))
            .send()
            .await?;
        let post: PostResponse = Self::handle_response(response).await?;
        Ok(Post::try_from(post)?)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), ClientError> {
        let response = self.client.delete(self.post_url(id)).send().await?;
        let body: DeleteResponse = Self::handle_response(response).await?;
        tracing::debug!(post_id = body.deleted_id, "Delete acknowledged");
        Ok(())
    }
}
