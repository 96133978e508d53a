//! Data models for the catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorForm, AuthorView, FieldError, NewAuthor};
pub use book::{Book, BookView, NewBook};
