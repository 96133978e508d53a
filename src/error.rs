//! Error types for the catalog server

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::json;
use thiserror::Error;

// `IntoResponse` has no access to `AppState`, so error pages use their own registry
static ERROR_PAGE: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    for (name, source) in [
        ("layout", crate::views::LAYOUT_TEMPLATE),
        ("error", include_str!("../templates/error.hbs")),
    ] {
        if let Err(e) = registry.register_template_string(name, source) {
            tracing::error!("Invalid {} template: {}", name, e);
        }
    }
    registry
});

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Template(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Template(e) => tracing::error!("Template error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::BadRequest(msg) => tracing::debug!("Bad request: {}", msg),
        }

        let status = self.status();
        let message = self.public_message();
        let data = json!({
            "title": message,
            "status": status.as_u16(),
            "message": message,
        });

        let body = ERROR_PAGE.render("error", &data).unwrap_or_else(|e| {
            tracing::error!("Failed to render error page: {}", e);
            format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"))
        });

        (status, Html(body)).into_response()
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
