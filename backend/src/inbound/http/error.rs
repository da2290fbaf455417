//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`DomainError`] HTTP-agnostic while letting Actix handlers
//! return it directly. The status is chosen from the [`ErrorCode`] alone and
//! the body is always `{"error": "<message>"}`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{DomainError, ErrorCode};

use super::response::{ErrorBody, json_response};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        json_response(self.status_code(), &ErrorBody::new(self.message()))
    }
}

#[cfg(test)]
mod tests;
