use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::dispatch::intent::{IntentResolver, StructuredIntent};
use crate::error::NluError;

pub const DEFAULT_NLU_URL: &str = "http://localhost:5000/api/nlu";
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// HTTP client for the intent-classification endpoint.
#[derive(Clone)]
pub struct NluClient {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct NluRequest<'a> {
    input: &'a str,
}

impl NluClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout) // connect + read, no retry
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for NluClient {
    fn default() -> Self {
        Self::new(DEFAULT_NLU_URL, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

#[async_trait]
impl IntentResolver for NluClient {
    async fn resolve(&self, utterance: &str) -> Result<StructuredIntent, NluError> {
        let response = self
            .client
            .post(&self.url)
            .json(&NluRequest { input: utterance })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NluError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        let kind = match &value {
            Value::Object(_) => None,
            Value::Array(_) => Some("array"),
            Value::String(_) => Some("string"),
            Value::Number(_) => Some("number"),
            Value::Bool(_) => Some("boolean"),
            Value::Null => Some("null"),
        };
        if let Some(kind) = kind {
            return Err(NluError::NotAnObject(kind));
        }

        let structured: StructuredIntent = serde_json::from_value(value)?;
        debug!("NLU intent '{}'", structured.label());
        Ok(structured)
    }
}
