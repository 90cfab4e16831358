//! Airtable implementation of [`RecordSink`].
//!
//! POSTs a single record to `/v0/{base}/{table}` with bearer auth. The API
//! base URL is injectable so tests can point the sink at a local mock
//! server.

use crate::sink::{CreatedRecord, RecordSink, SinkError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Record sink backed by the Airtable REST API.
#[derive(Clone)]
pub struct AirtableSink {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    base_id: String,
    table: String,
}

impl AirtableSink {
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>, table: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            base_id: base_id.into(),
            table: table.into(),
        }
    }

    /// Point the sink at a different API root (used by tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, self.table)
    }
}

#[async_trait]
impl RecordSink for AirtableSink {
    async fn create(&self, fields: &Value) -> Result<CreatedRecord, SinkError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if !(200..300).contains(&status) {
            return Err(SinkError::from_status(status, body));
        }

        let record_id = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("id").and_then(Value::as_str).map(String::from))
            .unwrap_or_default();

        Ok(CreatedRecord { record_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_table() {
        let sink = AirtableSink::new("key", "appBASE", "Applications")
            .with_api_url("http://127.0.0.1:9/v0");
        assert_eq!(sink.endpoint(), "http://127.0.0.1:9/v0/appBASE/Applications");
    }
}
