use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{Error, HttpResponse};
use paperclip::actix::{api_v2_operation, web};

use crate::api::{BookMetadata, ErrorBody};
use crate::lookup_provider::{LookupProvider, LookupProviderError};

fn cors_builder(status: StatusCode) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "GET"));
    builder
}

fn error_response(status: StatusCode, public_message: &str) -> HttpResponse {
    cors_builder(status).json(ErrorBody {
        code: status.as_u16(),
        public_message: public_message.to_string(),
    })
}

/// Serializes the payload compactly, then re-indents it with two spaces.
/// An indentation failure is logged and the compact form returned instead;
/// it never fails the request.
fn format_response(book: &BookMetadata) -> String {
    let compact = match serde_json::to_string(book) {
        Ok(compact) => compact,
        Err(err) => {
            tracing::error!("Failed to serialize book metadata {}", err);
            return String::new();
        }
    };
    match serde_json::from_str::<serde_json::Value>(&compact)
        .and_then(|value| serde_json::to_string_pretty(&value))
    {
        Ok(pretty) => pretty,
        Err(err) => {
            tracing::warn!("JSON indent error: {}", err);
            compact
        }
    }
}

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_book_without_isbn() -> Result<HttpResponse, Error> {
    Ok(error_response(StatusCode::BAD_REQUEST, "missing ISBN"))
}

#[api_v2_operation]
pub async fn get_book(
    lookup_provider: Data<Arc<dyn LookupProvider>>,
    isbn: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let isbn = isbn.into_inner();
    if isbn.is_empty() {
        return Ok(error_response(StatusCode::BAD_REQUEST, "missing ISBN"));
    }

    Ok(match lookup_provider.lookup(&isbn).await {
        Ok(book) => cors_builder(StatusCode::OK)
            .content_type("application/json")
            .body(format_response(&book)),
        Err(LookupProviderError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, "book not found")
        }
        // Generic provider errors are classified as caller-facing, not server faults.
        Err(err) => {
            tracing::error!("Lookup for {} failed {}", isbn, err);
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    })
}

#[cfg(test)]
mod handler_tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::web::Data;
    use paperclip::actix::OpenApiExt;
    use reqwest::StatusCode as ProviderStatusCode;

    use crate::api::{BookMetadata, ErrorBody, Identifiers};
    use crate::app_config::config_app;
    use crate::handlers::format_response;
    use crate::lookup_provider::{LookupProvider, LookupProviderError};

    struct FoundProvider(BookMetadata);

    #[async_trait::async_trait]
    impl LookupProvider for FoundProvider {
        async fn lookup(&self, _isbn: &str) -> Result<BookMetadata, LookupProviderError> {
            Ok(self.0.clone())
        }
    }

    struct NotFoundProvider;

    #[async_trait::async_trait]
    impl LookupProvider for NotFoundProvider {
        async fn lookup(&self, _isbn: &str) -> Result<BookMetadata, LookupProviderError> {
            Err(LookupProviderError::NotFound)
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl LookupProvider for FailingProvider {
        async fn lookup(&self, _isbn: &str) -> Result<BookMetadata, LookupProviderError> {
            Err(LookupProviderError::UnexpectedStatus(
                ProviderStatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }

    struct PanickingProvider;

    #[async_trait::async_trait]
    impl LookupProvider for PanickingProvider {
        async fn lookup(&self, _isbn: &str) -> Result<BookMetadata, LookupProviderError> {
            panic!("lookup must not be called")
        }
    }

    fn metadata() -> BookMetadata {
        BookMetadata {
            title: "The Go Programming Language".to_string(),
            published_year: "2015".to_string(),
            authors: vec!["Alan A. A. Donovan".to_string()],
            industry_identifiers: Identifiers {
                isbn: "0134190440".to_string(),
                isbn_13: "9780134190440".to_string(),
            },
            page_count: 380,
            source: "google".to_string(),
            ..BookMetadata::default()
        }
    }

    async fn get_request(
        provider: Arc<dyn LookupProvider>,
        uri: &str,
    ) -> (StatusCode, String) {
        let app = test::init_service(
            actix_web::App::new()
                .wrap_api()
                .app_data(Data::new(provider))
                .configure(config_app)
                .build(),
        )
        .await;

        let request = test::TestRequest::get().uri(uri).to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    /// Tests that an empty path parameter is rejected before any provider call
    async fn test_get_book_with_empty_isbn_is_bad_request() {
        let (status, body) =
            get_request(Arc::new(PanickingProvider), "/api/book/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.code, 400);
        assert_eq!(error.public_message, "missing ISBN");
    }

    #[tokio::test]
    /// Tests that a missing path parameter is rejected before any provider call
    async fn test_get_book_without_isbn_is_bad_request() {
        let (status, body) = get_request(Arc::new(PanickingProvider), "/api/book").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.public_message, "missing ISBN");
    }

    #[tokio::test]
    /// Tests the success path: 200, valid JSON body, two-space indentation
    async fn test_get_book_found_returns_pretty_payload() {
        let (status, body) = get_request(
            Arc::new(FoundProvider(metadata())),
            "/api/book/9780134190440",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let parsed: BookMetadata = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, metadata());
        assert!(body.contains("\n  \"title\""));
    }

    #[tokio::test]
    /// Tests the typed not-found mapping
    async fn test_get_book_not_found_is_404() {
        let (status, body) =
            get_request(Arc::new(NotFoundProvider), "/api/book/1111111111").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.code, 404);
        assert_eq!(error.public_message, "book not found");
    }

    #[tokio::test]
    /// Tests that unclassified provider errors map to 400, not 500
    async fn test_get_book_provider_error_is_bad_request() {
        let (status, body) =
            get_request(Arc::new(FailingProvider), "/api/book/9780134190440").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.code, 400);
        assert!(error.public_message.contains("503"));
    }

    #[tokio::test]
    /// Tests that every response carries the permissive CORS headers
    async fn test_responses_carry_cors_headers() {
        let app = test::init_service(
            actix_web::App::new()
                .wrap_api()
                .app_data(Data::new(
                    Arc::new(NotFoundProvider) as Arc<dyn LookupProvider>
                ))
                .configure(config_app)
                .build(),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/api/book/1111111111")
            .to_request();
        let response = test::call_service(&app, request).await;
        let headers = response.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type"
        );
        assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "GET");
    }

    #[::std::prelude::v1::test]
    /// Tests that the payload formatter indents with exactly two spaces
    fn test_format_response_uses_two_space_indent() {
        let body = format_response(&metadata());
        let reparsed: BookMetadata = serde_json::from_str(&body).unwrap();
        assert_eq!(reparsed, metadata());

        for line in body.lines().skip(1).take(1) {
            assert!(line.starts_with("  \""));
        }
    }
}
