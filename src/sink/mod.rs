//! Record sink — the external record-creation collaborator.
//!
//! The detector's output is forwarded to a tabular-data backend through the
//! [`RecordSink`] trait. The sink reports success with the created record id
//! or a [`SinkError`] from a fixed taxonomy keyed by HTTP status; retry
//! policy is the caller's concern (see [`crate::capture::submit`]).

pub mod airtable;

use async_trait::async_trait;
use serde_json::Value;

pub use airtable::AirtableSink;

/// A record successfully created in the backing table.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRecord {
    pub record_id: String,
}

/// Fixed error taxonomy for record creation, keyed by HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("invalid API key — check your configured credentials")]
    InvalidApiKey,
    #[error("access denied — the API key lacks permission for this base")]
    AccessDenied,
    #[error("base or table not found — check base id and table name")]
    NotFound,
    #[error("field mismatch — the table is missing one of the submitted columns")]
    FieldMismatch,
    #[error("rate limited by the API — retry after a short wait")]
    RateLimited,
    #[error("service error (HTTP {status})")]
    ServiceError { status: u16 },
    #[error("unexpected response (HTTP {status}): {body}")]
    Unexpected { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SinkError {
    /// Map a non-success HTTP status to the taxonomy.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => SinkError::InvalidApiKey,
            403 => SinkError::AccessDenied,
            404 => SinkError::NotFound,
            422 => SinkError::FieldMismatch,
            429 => SinkError::RateLimited,
            500..=599 => SinkError::ServiceError { status },
            _ => SinkError::Unexpected { status, body },
        }
    }

    /// Whether a retry can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SinkError::RateLimited | SinkError::ServiceError { .. } | SinkError::Transport(_)
        )
    }
}

/// External record-creation collaborator.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Create one record from a `fields` JSON object mapping column names
    /// to values.
    async fn create(&self, fields: &Value) -> Result<CreatedRecord, SinkError>;
}
