//! Post CRUD endpoints.

use actix_web::{HttpResponse, web};
use blog_core::PostId;
use blog_shared::{DeleteResponse, PostRequest, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Path ids must be plain integers.
fn parse_id(raw: &str) -> AppResult<PostId> {
    raw.parse().map_err(|_| AppError::invalid_id())
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list()
        .await
        .map_err(AppError::during("fetch posts"))?;

    tracing::debug!(count = posts.len(), "Listing posts");
    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state
        .posts
        .get(id)
        .await
        .map_err(AppError::during("fetch post"))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(body.into_inner().into())
        .await
        .map_err(AppError::during("create post"))?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state
        .posts
        .update(id, body.into_inner().into())
        .await
        .map_err(AppError::during("update post"))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state
        .posts
        .delete(id)
        .await
        .map_err(AppError::during("delete post"))?;

    Ok(HttpResponse::Ok().json(DeleteResponse::deleted(id)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_then_list_newest_first() {
        let app = test_app!();

        for title in ["First post", "Second post"] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": title, "content": "Plenty of content here." }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["title"], "Second post");
        assert_eq!(body[0]["author"], "Anonymous");
        assert!(body[0]["createdAt"].is_string());
    }

    #[actix_web::test]
    async fn test_create_trims_and_requires_fields() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "  Hello World  ", "content": " This is long enough. ", "author": "Ann" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "Hello World");
        assert_eq!(body["content"], "This is long enough.");
        assert_eq!(body["author"], "Ann");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Only a title" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Title and content are required" }));
    }

    #[actix_web::test]
    async fn test_create_rejects_invalid_lengths() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Hi", "content": "This is long enough." }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Title must be at least 3 characters long");
    }

    #[actix_web::test]
    async fn test_get_rejects_non_integer_id() {
        let app = test_app!();

        for uri in ["/api/posts/abc", "/api/posts/1.5"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Invalid post ID" }));
        }
    }

    #[actix_web::test]
    async fn test_missing_post_is_not_found() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/posts/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Post not found" }));

        let req = test::TestRequest::delete().uri("/api/posts/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/api/posts/99")
            .set_json(json!({ "title": "Valid title", "content": "Valid content here" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_keeps_author_when_omitted() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Original", "content": "Original content", "author": "Ann" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/posts/{}", created["id"]);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "title": "Edited", "content": "Edited content here" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated["title"], "Edited");
        assert_eq!(updated["author"], "Ann");
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert_ne!(updated["updatedAt"], created["updatedAt"]);
    }

    #[actix_web::test]
    async fn test_delete_reports_deleted_id() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Doomed", "content": "About to be deleted" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/posts/{}", created["id"]);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Post deleted successfully",
                "deletedId": created["id"],
            })
        );

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_json_uses_error_body() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
