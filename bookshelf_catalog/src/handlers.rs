use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::web::{Bytes, Data};
use actix_web::{Error, HttpResponse};
use paperclip::actix::api_v2_operation;

use crate::api::{BookRecord, UpsertOutcome};
use crate::catalog_repository::CatalogRepository;

fn respond(status: StatusCode, body: String) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST"));
    builder.body(body)
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn upsert_book(
    catalog_repository: Data<Arc<dyn CatalogRepository>>,
    body: Bytes,
) -> Result<HttpResponse, Error> {
    // Malformed JSON falls back to a zero-valued record, which the field
    // check below rejects the same way as incomplete input.
    let record: BookRecord = serde_json::from_slice(&body).unwrap_or_default();

    let identifiers = &record.industry_identifiers;
    if (identifiers.isbn.is_empty() && identifiers.isbn_13.is_empty()) || record.user_id.is_empty()
    {
        return Ok(respond(
            StatusCode::BAD_REQUEST,
            "missing ISBN13 or UserID".to_string(),
        ));
    }

    Ok(match catalog_repository.upsert_book(record).await {
        Ok(UpsertOutcome::Created) => respond(StatusCode::CREATED, "record created.".to_string()),
        Ok(UpsertOutcome::Updated) => respond(StatusCode::ACCEPTED, "record updated.".to_string()),
        Err(err) => {
            tracing::error!("Upsert book failed {}", err);
            respond(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    })
}
