//! Router tests over the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use locallibrary::{
    api,
    config::AppConfig,
    models::{Author, Book, NewAuthor, NewBook},
    repository::{MemoryRepository, Repository},
    AppError, AppResult, AppState,
};

/// Store whose every call fails like a lost database connection
struct UnreachableRepository;

fn store_down<T>() -> AppResult<T> {
    Err(AppError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl Repository for UnreachableRepository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        store_down()
    }

    async fn find_author(&self, _id: Uuid) -> AppResult<Option<Author>> {
        store_down()
    }

    async fn find_books_by_author(&self, _author_id: Uuid) -> AppResult<Vec<Book>> {
        store_down()
    }

    async fn insert_author(&self, _data: &NewAuthor) -> AppResult<Author> {
        store_down()
    }

    async fn delete_author(&self, _id: Uuid) -> AppResult<bool> {
        store_down()
    }

    async fn count_authors(&self) -> AppResult<i64> {
        store_down()
    }

    async fn count_books(&self) -> AppResult<i64> {
        store_down()
    }

    async fn ping(&self) -> AppResult<()> {
        store_down()
    }
}

fn unreachable_router() -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(UnreachableRepository))
        .expect("Failed to build state");
    api::router(state)
}

struct TestApp {
    router: Router,
    repository: Arc<MemoryRepository>,
}

impl TestApp {
    fn new() -> Self {
        let repository = Arc::new(MemoryRepository::new());
        let state = AppState::new(AppConfig::in_memory(), repository.clone())
            .expect("Failed to build state");
        Self {
            router: api::router(state),
            repository,
        }
    }

    async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn add_author(&self, first: &str, family: &str) -> Author {
        self.repository
            .insert_author(&NewAuthor {
                first_name: first.to_string(),
                family_name: family.to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap()
    }

    async fn add_book(&self, author: &Author, title: &str) {
        self.repository
            .insert_book(NewBook {
                title: title.to_string(),
                author: author.id,
                summary: format!("Summary of {}", title),
                isbn: "0000000000".to_string(),
            })
            .await;
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
async fn test_static_test_page() {
    let app = TestApp::new();
    let response = app.get("/test").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Hello World"));
}

#[tokio::test]
async fn test_catalog_home_counts() {
    let app = TestApp::new();
    let author = app.add_author("Jane", "Austen").await;
    app.add_book(&author, "Emma").await;
    app.add_book(&author, "Persuasion").await;

    let body = body_text(app.get("/catalog").await).await;
    assert!(body.contains("<strong>Books:</strong> 2"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
}

#[tokio::test]
async fn test_author_list_sorted_by_family_name() {
    let app = TestApp::new();
    app.add_author("Mary", "Shelley").await;
    app.add_author("Jane", "Austen").await;
    app.add_author("Charles", "Dickens").await;

    let response = app.get("/catalog/authors").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    let austen = body.find("Austen, Jane").unwrap();
    let dickens = body.find("Dickens, Charles").unwrap();
    let shelley = body.find("Shelley, Mary").unwrap();
    assert!(austen < dickens && dickens < shelley);
}

#[tokio::test]
async fn test_author_detail_lists_books() {
    let app = TestApp::new();
    let author = app.add_author("Jane", "Austen").await;
    app.add_book(&author, "Emma").await;

    let response = app.get(&author.url()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Author: Austen, Jane"));
    assert!(body.contains("Emma"));
}

#[tokio::test]
async fn test_author_detail_not_found() {
    let app = TestApp::new();
    let orphan = Uuid::new_v4();

    let response = app.get(&format!("/catalog/author/{}", orphan)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Author not found"));
    assert!(!body.contains("Author:"));
}

#[tokio::test]
async fn test_author_detail_malformed_id() {
    let app = TestApp::new();
    let response = app.get("/catalog/author/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_form() {
    let app = TestApp::new();
    let response = app.get("/catalog/author/create").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Create Author"));
}

#[tokio::test]
async fn test_create_author_redirects_to_detail() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=John&family_name=Smith&date_of_birth=&date_of_death=",
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let authors = app.repository.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].first_name, "John");
    assert_eq!(authors[0].date_of_birth, None);
    assert_eq!(authors[0].date_of_death, None);
    assert_eq!(location(&response), authors[0].url());
}

#[tokio::test]
async fn test_create_invalid_rerenders_without_write() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=J%21hn&family_name=Smith&date_of_birth=1900-01-01",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("First name has non-alphanumeric characters"));
    // submitted values are kept
    assert!(body.contains("value=\"Smith\""));
    assert!(body.contains("value=\"1900-01-01\""));
    assert_eq!(app.repository.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_confirmation_missing_author_redirects() {
    let app = TestApp::new();
    let response = app
        .get(&format!("/catalog/author/{}/delete", Uuid::new_v4()))
        .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog/authors");
}

#[tokio::test]
async fn test_delete_confirmation_page() {
    let app = TestApp::new();
    let author = app.add_author("Mary", "Shelley").await;

    let response = app.get(&format!("{}/delete", author.url())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Do you really want to delete this Author?"));
    assert!(body.contains(&author.id.to_string()));
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let app = TestApp::new();
    let author = app.add_author("Mary", "Shelley").await;

    let response = app
        .post_form(
            &format!("{}/delete", author.url()),
            &format!("authorid={}", author.id),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");
    assert!(app.repository.find_author(author.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_author_with_books_is_blocked() {
    let app = TestApp::new();
    let author = app.add_author("Jane", "Austen").await;
    app.add_book(&author, "Emma").await;

    let response = app
        .post_form(
            &format!("{}/delete", author.url()),
            &format!("authorid={}", author.id),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Delete the following books"));
    assert!(body.contains("Emma"));
    assert!(app.repository.find_author(author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_not_implemented() {
    let app = TestApp::new();
    let id = Uuid::new_v4();

    let body = body_text(app.get(&format!("/catalog/author/{}/update", id)).await).await;
    assert_eq!(body, "NOT IMPLEMENTED: Author update GET");

    let body = body_text(
        app.post_form(&format!("/catalog/author/{}/update", id), "")
            .await,
    )
    .await;
    assert_eq!(body, "NOT IMPLEMENTED: Author update POST");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");

    assert_eq!(app.get("/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_without_authorid_renders_error_page() {
    let app = TestApp::new();
    let author = app.add_author("Mary", "Shelley").await;

    let response = app.post_form(&format!("{}/delete", author.url()), "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert!(body_text(response).await.contains("All authors"));
    assert!(app.repository.find_author(author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_with_wrong_content_type_renders_error_page() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::post("/catalog/author/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"first_name":"John","family_name":"Smith"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("<h2>400</h2>"));
    assert_eq!(app.repository.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_failure_renders_error_page() {
    let router = unreachable_router();

    for uri in ["/catalog/authors", "/catalog", "/ready"] {
        let response = router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        let body = body_text(response).await;
        assert!(body.contains("Database error"), "{}", uri);
        assert!(body.contains("<h2>500</h2>"), "{}", uri);
    }

    let response = router
        .oneshot(
            Request::get(format!("/catalog/author/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
