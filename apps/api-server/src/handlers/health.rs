//! Health check endpoint.

use actix_web::{HttpResponse, web};
use blog_shared::HealthResponse;
use blog_shared::dto::format_timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Body returned when the store cannot be reached.
#[derive(Debug, Serialize)]
pub struct HealthFailure {
    pub status: &'static str,
    pub error: String,
}

/// Health check endpoint - returns server status and the number of stored posts.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.posts.count().await {
        Ok(posts_count) => HttpResponse::Ok().json(HealthResponse {
            status: "OK".to_string(),
            timestamp: format_timestamp(&chrono::Utc::now()),
            posts_count,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HttpResponse::InternalServerError().json(HealthFailure {
                status: "ERROR",
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use blog_core::ports::{BaseRepository, PostRepository};
    use blog_core::{NewPost, Post, PostChanges, PostId, RepoError};
    use serde_json::{Value, json};

    use super::*;

    /// Store whose every call fails as if the connection dropped.
    struct UnreachableStore;

    fn unreachable() -> RepoError {
        RepoError::Connection("connection refused".into())
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for UnreachableStore {
        async fn find_by_id(&self, _id: PostId) -> Result<Option<Post>, RepoError> {
            Err(unreachable())
        }

        async fn delete(&self, _id: PostId) -> Result<(), RepoError> {
            Err(unreachable())
        }
    }

    #[async_trait]
    impl PostRepository for UnreachableStore {
        async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
            Err(unreachable())
        }

        async fn insert(&self, _post: NewPost) -> Result<Post, RepoError> {
            Err(unreachable())
        }

        async fn update(&self, _id: PostId, _changes: PostChanges) -> Result<Option<Post>, RepoError> {
            Err(unreachable())
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Err(unreachable())
        }
    }

    #[actix_web::test]
    async fn test_health_reports_post_count() {
        let state = AppState::in_memory();
        state.posts.seed_if_empty().await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "OK");
        assert_eq!(body["postsCount"], 2);
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[actix_web::test]
    async fn test_health_reports_store_failure() {
        let state = AppState::with_repository(Arc::new(UnreachableStore));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "status": "ERROR",
                "error": "Database connection failed: connection refused",
            })
        );
    }
}
