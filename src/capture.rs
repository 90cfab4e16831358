//! Submission path — detection output to tracker record.
//!
//! Merges a [`DetectionOutput`] with auto-generated tracking fields and
//! hands the result to a [`RecordSink`], retrying with exponential backoff
//! on retryable errors.

use crate::detect::{DetectionOutput, Field};
use crate::sink::{CreatedRecord, RecordSink, SinkError};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

/// Fixed status assigned to every captured record.
const CAPTURE_STATUS: &str = "Saved";

/// Fixed source label identifying records created by this tool.
const SOURCE_LABEL: &str = "JobLens";

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 500;

/// A job record ready for submission: detected fields plus tracking fields.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub record_ref: String,
    pub status: &'static str,
    pub captured_at: DateTime<Utc>,
    pub source: &'static str,
    pub url: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub summary: String,
}

impl JobRecord {
    /// Build a record from detection output and the originating URL.
    pub fn new(output: &DetectionOutput, url: impl Into<String>) -> Self {
        Self {
            record_ref: Uuid::new_v4().to_string(),
            status: CAPTURE_STATUS,
            captured_at: Utc::now(),
            source: SOURCE_LABEL,
            url: url.into(),
            company: output.value(Field::Company).to_string(),
            title: output.value(Field::JobTitle).to_string(),
            location: output.value(Field::Location).to_string(),
            summary: output.value(Field::Description).to_string(),
        }
    }

    /// Column-name mapping expected by the backing table.
    pub fn fields(&self) -> Value {
        json!({
            "Company": self.company,
            "Title": self.title,
            "Location": self.location,
            "Summary": self.summary,
            "Status": self.status,
            "Source": self.source,
            "Captured At": self.captured_at.to_rfc3339(),
            "URL": self.url,
            "Record Ref": self.record_ref,
        })
    }
}

/// Submit a record, retrying retryable sink errors with exponential backoff.
///
/// Non-retryable errors (bad credentials, schema mismatch) surface
/// immediately with their taxonomy message.
pub async fn submit(sink: &dyn RecordSink, record: &JobRecord) -> Result<CreatedRecord, SinkError> {
    let fields = record.fields();
    let mut attempt = 0u32;

    loop {
        match sink.create(&fields).await {
            Ok(created) => {
                tracing::info!(record_id = %created.record_id, "record created");
                return Ok(created);
            }
            Err(err) if err.is_retryable() && attempt + 1 < MAX_ATTEMPTS => {
                attempt += 1;
                let delay = Duration::from_millis(BACKOFF_BASE_MS * 2u64.pow(attempt - 1));
                tracing::warn!(%err, attempt, "record creation failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
