use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Book metadata as returned by the lookup provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookMetadata {
    pub title: String,
    pub published_year: String,
    pub authors: Vec<String>,
    pub description: String,
    pub industry_identifiers: Identifiers,
    pub page_count: i64,
    pub categories: Vec<String>,
    pub image_links: ImageLinks,
    pub publisher: String,
    pub language: String,
    /// Which provider supplied the metadata.
    pub source: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct Identifiers {
    pub isbn: String,
    pub isbn_13: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ImageLinks {
    pub small_image_url: String,
    pub image_url: String,
    pub large_image_url: String,
}

/// Structured error body returned for every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ErrorBody {
    pub code: u16,
    pub public_message: String,
}
