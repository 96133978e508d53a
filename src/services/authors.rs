//! Author management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDetail, NewAuthor},
    repository::DynRepository,
};

/// Result of a delete submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing to delete
    Missing,
    /// Books still reference the author; nothing was written
    Blocked(AuthorDetail),
}

#[derive(Clone)]
pub struct AuthorService {
    repository: DynRepository,
}

impl AuthorService {
    pub fn new(repository: DynRepository) -> Self {
        Self { repository }
    }

    /// All authors, ascending by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.list_authors().await
    }

    /// Fetch an author and their books together.
    ///
    /// Both reads run concurrently and the first failure wins. `None` when the
    /// author does not exist, whatever books may still reference the id.
    pub async fn find_with_books(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let (author, books) = tokio::try_join!(
            self.repository.find_author(id),
            self.repository.find_books_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    /// Author detail, or `NotFound`
    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        self.find_with_books(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub async fn create(&self, data: &NewAuthor) -> AppResult<Author> {
        let author = self.repository.insert_author(data).await?;
        tracing::info!("Created author id={} ({})", author.id, author.name());
        Ok(author)
    }

    /// Delete an author unless books still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome> {
        let Some(detail) = self.find_with_books(id).await? else {
            tracing::debug!("Delete requested for missing author id={}", id);
            return Ok(DeleteOutcome::Missing);
        };

        if detail.has_books() {
            tracing::info!(
                "Refusing to delete author id={}: {} book(s) reference it",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }

        if self.repository.delete_author(id).await? {
            tracing::info!("Deleted author id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
