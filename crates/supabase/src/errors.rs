//! Errors raised while talking to the hosted store.

use franchise_crm_core::errors::{DatabaseError, Error};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupabaseError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<SupabaseError> for Error {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Api { status, message } => match status {
                StatusCode::NOT_FOUND => Error::Database(DatabaseError::NotFound(message)),
                StatusCode::CONFLICT => Error::Database(DatabaseError::UniqueViolation(message)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Error::Database(DatabaseError::QueryFailed(message))
                }
                _ => Error::Store(format!("HTTP {}: {}", status.as_u16(), message)),
            },
            SupabaseError::Config(message) => Error::InvalidConfigValue(message),
            other => Error::Store(other.to_string()),
        }
    }
}

/// PostgREST error body.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorResponse {
    pub(crate) fn into_message(self) -> Option<String> {
        let mut parts = self.message.into_iter().chain(self.details).chain(self.hint);
        let first = parts.next()?;
        Some(parts.fold(first, |acc, part| format!("{} ({})", acc, part)))
    }
}
