use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// A single book in a user's personal catalog.
///
/// The catalog allows the same book to appear once per owning user:
/// records are keyed by (isbn, isbn_13, user_id).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_year: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry_identifiers: Identifiers,
    #[serde(default)]
    pub page_count: i64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub language: String,
    /// Provenance tag of where the metadata came from.
    #[serde(default)]
    pub source: String,
    /// Owner of this catalog entry, part of the record key.
    #[serde(default)]
    pub user_id: String,
    /// Caller-defined reading-status code, opaque to this service.
    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct Identifiers {
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub isbn_13: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ImageLinks {
    #[serde(default)]
    pub small_image_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub large_image_url: String,
}

/// Result of an upsert: whether a new record was inserted
/// or an existing one was replaced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
