use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{BookRecord, UpsertOutcome};

pub struct CatalogClient {
    url: String,
    client: ClientWithMiddleware,
}

impl CatalogClient {
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

    pub async fn upsert_book(&self, record: &BookRecord) -> anyhow::Result<UpsertOutcome> {
        let response = self
            .client
            .post(format!("{}/api/book", self.url))
            .json(record)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(UpsertOutcome::Created),
            StatusCode::ACCEPTED => Ok(UpsertOutcome::Updated),
            status => {
                let body = response.text().await.unwrap_or_default();
                bail!("Failed to upsert book: {} {}", status, body)
            }
        }
    }
}
