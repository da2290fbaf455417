//! Strict JSON request body extraction.
//!
//! [`StrictJson`] replaces `actix_web::web::Json` for request DTOs. It rejects
//! unknown fields and reports each decoding failure with its own message so
//! clients can tell an empty body from a typo in a field name.

use std::ops::Deref;

use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::ports::{CreateTodoRequest, UpdateTodoRequest};

/// Top-level keys a request DTO accepts.
///
/// Every listed field must be optional in the DTO (`#[serde(default)]`) so a
/// single key can be decoded on its own when attributing a type error.
pub trait JsonFields {
    /// Accepted keys.
    const FIELDS: &'static [&'static str];
}

impl JsonFields for CreateTodoRequest {
    const FIELDS: &'static [&'static str] = &["title", "user_id"];
}

impl JsonFields for UpdateTodoRequest {
    const FIELDS: &'static [&'static str] = &["title", "completed"];
}

/// Why a request body could not be turned into a DTO.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BodyDecodeError {
    /// No bytes, or whitespace only.
    #[error("Request body must not be empty")]
    Empty,
    /// The document is not valid JSON.
    #[error("Request body contains badly-formed JSON (at line {line}, column {column})")]
    Syntax { line: usize, column: usize },
    /// The document ended before it was complete.
    #[error("Request body contains badly-formed JSON")]
    Truncated,
    /// A key outside the DTO's field list.
    #[error("Request body contains unknown field \"{name}\"")]
    UnknownField { name: String },
    /// A value of the wrong type, attributed to a field when possible.
    #[error("{}", invalid_value_message(.field, .line, .column))]
    InvalidValue {
        field: Option<String>,
        line: usize,
        column: usize,
    },
    /// The payload could not be read or exceeded the size limit.
    #[error("Request body could not be read")]
    Unreadable,
}

fn invalid_value_message(field: &Option<String>, line: &usize, column: &usize) -> String {
    match field {
        Some(name) => format!(
            "Request body contains an invalid value for the \"{name}\" field (at line {line}, column {column})"
        ),
        None => format!("Request body contains an invalid value (at line {line}, column {column})"),
    }
}

impl From<BodyDecodeError> for DomainError {
    fn from(error: BodyDecodeError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Find the first key whose value alone fails to decode into `T`.
fn attribute_field<T>(object: &Map<String, Value>) -> Option<String>
where
    T: DeserializeOwned,
{
    object.iter().find_map(|(key, value)| {
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        serde_json::from_value::<T>(Value::Object(single))
            .is_err()
            .then(|| key.clone())
    })
}

/// Decode `bytes` into `T`, classifying every failure.
///
/// # Examples
/// ```
/// use todo_backend::inbound::http::json_body::{BodyDecodeError, decode_strict};
/// use todo_backend::domain::ports::UpdateTodoRequest;
///
/// let err = decode_strict::<UpdateTodoRequest>(br#"{"done":true}"#).expect_err("unknown field");
/// assert_eq!(err, BodyDecodeError::UnknownField { name: "done".into() });
/// ```
pub fn decode_strict<T>(bytes: &[u8]) -> Result<T, BodyDecodeError>
where
    T: DeserializeOwned + JsonFields,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyDecodeError::Empty);
    }

    let document: Value = serde_json::from_slice(bytes).map_err(|err| match err.classify() {
        Category::Eof => BodyDecodeError::Truncated,
        _ => BodyDecodeError::Syntax {
            line: err.line(),
            column: err.column(),
        },
    })?;

    // A `null` document carries no fields, like `{}`.
    let bytes: &[u8] = if document.is_null() { b"{}" } else { bytes };

    if let Value::Object(object) = &document {
        if let Some(name) = object
            .keys()
            .find(|key| !T::FIELDS.contains(&key.as_str()))
        {
            return Err(BodyDecodeError::UnknownField { name: name.clone() });
        }
    }

    serde_json::from_slice::<T>(bytes).map_err(|err| {
        let field = match &document {
            Value::Object(object) => attribute_field::<T>(object),
            _ => None,
        };
        BodyDecodeError::InvalidValue {
            field,
            line: err.line(),
            column: err.column(),
        }
    })
}

/// Request body extractor built on [`decode_strict`].
///
/// The payload size limit is taken from `actix_web::web::PayloadConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictJson<T>(pub T);

impl<T> StrictJson<T> {
    /// Unwrap the decoded DTO.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for StrictJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for StrictJson<T>
where
    T: DeserializeOwned + JsonFields + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = fut.await.map_err(|err| {
                debug!(error = %err, "failed to read request body");
                DomainError::from(BodyDecodeError::Unreadable)
            })?;
            decode_strict::<T>(&bytes)
                .map(StrictJson)
                .map_err(|err| DomainError::from(err).into())
        })
    }
}
