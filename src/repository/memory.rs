//! In-process repository, selected with a `memory:` database URL

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{Author, Book, NewAuthor, NewBook},
};

#[derive(Default)]
struct Collections {
    authors: Vec<Author>,
    books: Vec<Book>,
}

/// Keeps records in insertion order
#[derive(Default)]
pub struct MemoryRepository {
    collections: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book; the author reference is not checked
    pub async fn insert_book(&self, data: NewBook) -> Book {
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title,
            author: data.author,
            summary: data.summary,
            isbn: data.isbn,
        };
        self.collections.write().await.books.push(book.clone());
        book
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.collections.read().await.authors.clone();
        // Stable sort keeps insertion order for equal names
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        let collections = self.collections.read().await;
        Ok(collections.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        Ok(collections
            .books
            .iter()
            .filter(|b| b.author == author_id)
            .cloned()
            .collect())
    }

    async fn insert_author(&self, data: &NewAuthor) -> AppResult<Author> {
        let author = data.clone().into_author(Uuid::new_v4());
        self.collections.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let before = collections.authors.len();
        collections.authors.retain(|a| a.id != id);
        Ok(collections.authors.len() < before)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.collections.read().await.authors.len() as i64)
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.collections.read().await.books.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
