pub use in_memory_catalog_repository::InMemoryCatalogRepository;
pub use postgres_catalog_repository::{PostgresCatalogRepository, PostgresCatalogRepositoryConfig};

use crate::api::{BookRecord, UpsertOutcome};

mod in_memory_catalog_repository;
mod postgres_catalog_repository;

#[derive(thiserror::Error, Debug)]
pub enum CatalogRepositoryError {
    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Database operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Inserts the record if no record exists for its
    /// (isbn, isbn_13, user_id) key, otherwise replaces the stored record.
    async fn upsert_book(&self, record: BookRecord)
        -> Result<UpsertOutcome, CatalogRepositoryError>;
}
