//! Site index and catalog home

use axum::{extract::State, response::{Html, Redirect}};
use serde_json::json;

use crate::{error::AppResult, AppState};

pub async fn index() -> Redirect {
    Redirect::to("/catalog")
}

pub async fn test_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render("test", &json!({ "title": "Hello World" }))
}

/// Catalog home page with record counts
pub async fn catalog_home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    state.views.render(
        "index",
        &json!({
            "title": "Local Library Home",
            "author_count": counts.author_count,
            "book_count": counts.book_count,
        }),
    )
}
