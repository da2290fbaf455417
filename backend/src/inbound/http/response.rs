//! JSON response encoding shared by handlers and the error mapper.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Body sent when a response value cannot be serialised.
pub const ENCODE_FAILURE_BODY: &str = r#"{"error":"Internal server error preparing response"}"#;

/// Error envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "todo with ID 7 not found")]
    pub error: String,
}

impl ErrorBody {
    /// Wrap a message in the envelope.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Serialise `body` with the given status.
///
/// Encoding is done up front so a serialisation failure can still become a
/// well-formed 500 response instead of a truncated body.
pub fn json_response<T>(status: StatusCode, body: &T) -> HttpResponse
where
    T: Serialize + ?Sized,
{
    match serde_json::to_vec(body) {
        Ok(bytes) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(bytes),
        Err(err) => {
            error!(error = %err, "failed to encode response body");
            HttpResponse::InternalServerError()
                .content_type(ContentType::json())
                .body(ENCODE_FAILURE_BODY)
        }
    }
}
