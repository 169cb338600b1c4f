use std::collections::HashMap;

use crate::api::{BookRecord, UpsertOutcome};
use crate::catalog_repository::{CatalogRepository, CatalogRepositoryError};

/// (isbn, isbn_13, user_id)
type RecordKey = (String, String, String);

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    records: parking_lot::RwLock<HashMap<RecordKey, BookRecord>>,
}

fn record_key(record: &BookRecord) -> RecordKey {
    (
        record.industry_identifiers.isbn.clone(),
        record.industry_identifiers.isbn_13.clone(),
        record.user_id.clone(),
    )
}

#[async_trait::async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn upsert_book(
        &self,
        record: BookRecord,
    ) -> Result<UpsertOutcome, CatalogRepositoryError> {
        let previous = self.records.write().insert(record_key(&record), record);
        Ok(if previous.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        })
    }
}
