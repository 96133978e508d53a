//! Business logic services

pub mod authors;
pub mod catalog;

use crate::repository::DynRepository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: DynRepository) -> Self {
        Self {
            authors: authors::AuthorService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
