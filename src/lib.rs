//! Local Library
//!
//! A small catalog web application: server-rendered pages for listing,
//! viewing, creating and deleting authors on top of a pluggable store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::DynRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: views::Views,
}

impl AppState {
    pub fn new(config: AppConfig, repository: DynRepository) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            views: views::Views::new()?,
        })
    }
}
