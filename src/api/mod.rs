//! HTTP handlers and routing

pub mod authors;
pub mod health;
pub mod index;

use axum::{extract::FromRequest, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// Form extractor whose rejections render through `AppError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct HtmlForm<T>(pub T);

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(index::catalog_home))
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        );

    Router::new()
        .route("/", get(index::index))
        .route("/test", get(index::test_page))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
