use std::time::Duration;

use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;

use crate::api::{BookMetadata, Identifiers, ImageLinks};
use crate::lookup_provider::{LookupProvider, LookupProviderError};

const SOURCE_NAME: &str = "google";

pub struct GoogleBooksLookupProvider {
    base_url: String,
    client: ClientWithMiddleware,
}

pub struct GoogleBooksLookupProviderConfig {
    pub base_url: String,
    /// Deadline for a single lookup request.
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<VolumeItem>>,
}

#[derive(Debug, Deserialize)]
struct VolumeItem {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "industryIdentifiers")]
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    #[serde(rename = "pageCount")]
    page_count: Option<i64>,
    categories: Option<Vec<String>>,
    #[serde(rename = "imageLinks")]
    image_links: Option<VolumeImageLinks>,
    publisher: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

#[derive(Debug, Deserialize)]
struct VolumeImageLinks {
    #[serde(rename = "smallThumbnail")]
    small_thumbnail: Option<String>,
    thumbnail: Option<String>,
}

impl GoogleBooksLookupProvider {
    pub fn new(config: GoogleBooksLookupProviderConfig) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            base_url: config.base_url,
            client,
        })
    }
}

fn to_book_metadata(info: VolumeInfo) -> BookMetadata {
    let mut identifiers = Identifiers::default();
    for identifier in info.industry_identifiers.unwrap_or_default() {
        match identifier.kind.as_str() {
            "ISBN_10" => identifiers.isbn = identifier.identifier,
            "ISBN_13" => identifiers.isbn_13 = identifier.identifier,
            _ => {}
        }
    }

    let image_links = info
        .image_links
        .map(|links| ImageLinks {
            small_image_url: links.small_thumbnail.unwrap_or_default(),
            image_url: links.thumbnail.unwrap_or_default(),
            large_image_url: String::new(),
        })
        .unwrap_or_default();

    BookMetadata {
        title: info.title.unwrap_or_default(),
        published_year: info.published_date.unwrap_or_default(),
        authors: info.authors.unwrap_or_default(),
        description: info.description.unwrap_or_default(),
        industry_identifiers: identifiers,
        page_count: info.page_count.unwrap_or_default(),
        categories: info.categories.unwrap_or_default(),
        image_links,
        publisher: info.publisher.unwrap_or_default(),
        language: info.language.unwrap_or_default(),
        source: SOURCE_NAME.to_string(),
    }
}

#[async_trait::async_trait]
impl LookupProvider for GoogleBooksLookupProvider {
    async fn lookup(&self, isbn: &str) -> Result<BookMetadata, LookupProviderError> {
        let response = self
            .client
            .get(format!("{}/books/v1/volumes", self.base_url))
            .query(&[("q", format!("isbn:{}", isbn))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupProviderError::UnexpectedStatus(response.status()));
        }

        let body = response.text().await?;
        let volumes: VolumesResponse = serde_json::from_str(&body)?;

        let first_item = volumes
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(LookupProviderError::NotFound)?;

        Ok(to_book_metadata(first_item.volume_info))
    }
}
