pub use google_books_lookup_provider::{
    GoogleBooksLookupProvider, GoogleBooksLookupProviderConfig,
};

use crate::api::BookMetadata;

mod google_books_lookup_provider;

#[derive(thiserror::Error, Debug)]
pub enum LookupProviderError {
    /// The provider answered but knows no book for the identifier.
    #[error("book not found")]
    NotFound,

    #[error("Provider request failed: {0}")]
    RequestFailure(#[from] reqwest_middleware::Error),

    #[error("Provider response failure: {0}")]
    ResponseFailure(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Failed to deserialize provider response: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

#[async_trait::async_trait]
pub trait LookupProvider: Send + Sync {
    /// Looks up book metadata for a raw ISBN-10 or ISBN-13 string.
    /// The identifier is passed through as-is; checksum and format
    /// validation are the provider's responsibility.
    async fn lookup(&self, isbn: &str) -> Result<BookMetadata, LookupProviderError>;
}
