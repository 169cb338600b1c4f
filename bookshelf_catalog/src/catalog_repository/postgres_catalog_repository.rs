use std::time::Duration;

use anyhow::Context;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{BookRecord, UpsertOutcome};
use crate::catalog_repository::{CatalogRepository, CatalogRepositoryError};

pub struct PostgresCatalogRepository {
    client: Client,
    operation_timeout: Duration,
}

pub struct PostgresCatalogRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
    /// Deadline for a single upsert, connection included.
    pub operation_timeout: Duration,
}

impl PostgresCatalogRepository {
    pub async fn init(config: PostgresCatalogRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Postgres connection_str: {}", connection_str);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS books (
            isbn            TEXT NOT NULL,
            isbn_13         TEXT NOT NULL,
            user_id         TEXT NOT NULL,
            record          JSONB NOT NULL,
            PRIMARY KEY (isbn, isbn_13, user_id)
            )
        ",
            )
            .await
            .context("Failed to setup table")?;
        Ok(Self {
            client,
            operation_timeout: config.operation_timeout,
        })
    }

    async fn run_upsert(&self, record: &BookRecord) -> Result<UpsertOutcome, CatalogRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "INSERT INTO books (isbn, isbn_13, user_id, record) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (isbn, isbn_13, user_id) DO UPDATE SET record = EXCLUDED.record \
                 RETURNING (xmax = 0)",
            )
            .await?;

        let rows = self
            .client
            .query(
                &stmt,
                &[
                    &record.industry_identifiers.isbn,
                    &record.industry_identifiers.isbn_13,
                    &record.user_id,
                    &json!(record),
                ],
            )
            .await?;

        // xmax is zero only for rows freshly inserted by this statement
        let inserted: bool = rows
            .first()
            .ok_or_else(|| CatalogRepositoryError::Other("Upsert returned no row".to_string()))?
            .try_get(0)?;

        Ok(if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }
}

#[async_trait::async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn upsert_book(
        &self,
        record: BookRecord,
    ) -> Result<UpsertOutcome, CatalogRepositoryError> {
        match tokio::time::timeout(self.operation_timeout, self.run_upsert(&record)).await {
            Ok(result) => result,
            Err(_) => Err(CatalogRepositoryError::Timeout(self.operation_timeout)),
        }
    }
}
