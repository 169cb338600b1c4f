use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::BookMetadata;

pub struct BookLookupClient {
    url: String,
    client: ClientWithMiddleware,
}

impl BookLookupClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub async fn get_book(&self, isbn: &str) -> anyhow::Result<Option<BookMetadata>> {
        let response = self
            .client
            .get(format!("{}/api/book/{}", self.url, isbn))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Some(
                response
                    .json()
                    .await
                    .context("Failed to parse book metadata")?,
            )),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                bail!("Failed to get book: {} {}", status, body)
            }
        }
    }
}
