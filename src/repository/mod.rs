//! Repository layer for catalog storage

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, NewAuthor},
};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Storage operations the catalog needs.
///
/// Implementations must return authors from `list_authors` ordered by
/// ascending family name, keeping store order between equal names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>>;

    /// All books whose author reference equals `author_id`
    async fn find_books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;

    async fn insert_author(&self, data: &NewAuthor) -> AppResult<Author>;

    /// Returns whether a record was removed
    async fn delete_author(&self, id: Uuid) -> AppResult<bool>;

    async fn count_authors(&self) -> AppResult<i64>;

    async fn count_books(&self) -> AppResult<i64>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Shared handle to the configured repository
pub type DynRepository = Arc<dyn Repository>;
