//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AuthorDetail, AuthorForm, AuthorView, FieldError},
    services::authors::DeleteOutcome,
    AppState,
};

use super::HtmlForm;

pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Body of the delete confirmation form
#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: String,
}

/// Malformed ids can never match a stored author
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

/// Display list of all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let author_list: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();
    state.views.render(
        "author_list",
        &json!({ "title": "Author List", "author_list": author_list }),
    )
}

/// Display detail page for a specific author
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let detail = state.services.authors.detail(id).await?;
    state.views.render(
        "author_detail",
        &json!({
            "title": "Author Detail",
            "author": AuthorView::from(&detail.author),
            "author_books": detail.book_views(),
        }),
    )
}

fn render_form(
    state: &AppState,
    form: Option<&AuthorForm>,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    state.views.render(
        "author_form",
        &json!({ "title": "Create Author", "author": form, "errors": errors }),
    )
}

/// Display author create form
pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, None, &[])
}

/// Handle author create
pub async fn author_create_post(
    State(state): State<AppState>,
    HtmlForm(form): HtmlForm<AuthorForm>,
) -> AppResult<Response> {
    let form = form.sanitized();
    let data = match form.to_new_author() {
        Ok(data) => data,
        Err(errors) => {
            tracing::debug!("Author form rejected: {:?}", errors);
            return Ok(render_form(&state, Some(&form), &errors)?.into_response());
        }
    };

    let author = state.services.authors.create(&data).await?;
    Ok(Redirect::to(&author.url()).into_response())
}

fn render_delete(state: &AppState, detail: &AuthorDetail) -> AppResult<Html<String>> {
    state.views.render(
        "author_delete",
        &json!({
            "title": "Delete Author",
            "author": AuthorView::from(&detail.author),
            "author_books": detail.book_views(),
        }),
    )
}

/// Display author delete confirmation
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    };
    match state.services.authors.find_with_books(id).await? {
        Some(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        None => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
    }
}

/// Handle author delete; the author is identified by the submitted `authorid`
pub async fn author_delete_post(
    State(state): State<AppState>,
    HtmlForm(form): HtmlForm<DeleteAuthorForm>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&form.authorid) else {
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    };
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Blocked(detail) => Ok(render_delete(&state, &detail)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to(AUTHOR_LIST_URL).into_response())
        }
    }
}

pub async fn author_update_get() -> &'static str {
    "NOT IMPLEMENTED: Author update GET"
}

pub async fn author_update_post() -> &'static str {
    "NOT IMPLEMENTED: Author update POST"
}
