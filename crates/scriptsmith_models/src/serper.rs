//! Serper web search backend.

use crate::LlmMetrics;
use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::Client;
use scriptsmith_core::{ResearchSettings, SearchHit};
use scriptsmith_error::{HttpError, JsonError, ScriptsmithError, ScriptsmithResult};
use scriptsmith_interface::ResearchBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const SERVICE: &str = "serper";

/// Search request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SerperQuery {
    /// Query text
    q: String,
    /// Number of results
    num: u32,
    /// Country code
    #[serde(skip_serializing_if = "Option::is_none")]
    gl: Option<String>,
    /// Interface language
    #[serde(skip_serializing_if = "Option::is_none")]
    hl: Option<String>,
}

/// Search response body; only organic results are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Getters)]
pub struct SerperResponse {
    /// Organic results in rank order
    #[serde(default)]
    organic: Vec<SearchHit>,
}

/// Serper search client.
#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    api_key: String,
    endpoint: String,
    result_count: u32,
    country: Option<String>,
    language: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for SerperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperClient")
            .field("endpoint", &self.endpoint)
            .field("result_count", &self.result_count)
            .finish_non_exhaustive()
    }
}

impl SerperClient {
    /// Creates a new Serper client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key, settings), fields(endpoint = %settings.endpoint()))]
    pub fn new(api_key: impl Into<String>, settings: &ResearchSettings) -> ScriptsmithResult<Self> {
        let timeout = Duration::from_secs(*settings.timeout_secs());
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: settings.endpoint().clone(),
            result_count: *settings.result_count(),
            country: settings.country().clone(),
            language: settings.language().clone(),
            timeout,
        })
    }

    fn query(&self, text: &str) -> SerperQuery {
        SerperQuery {
            q: text.to_string(),
            num: self.result_count,
            gl: self.country.clone(),
            hl: self.language.clone(),
        }
    }

    async fn send(&self, text: &str) -> ScriptsmithResult<Vec<SearchHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&self.query(text))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, timeout = ?self.timeout, "Failed to send search request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!(status = %status, "Search service returned error");
            return Err(HttpError::with_status(status.as_u16(), &body).into());
        }

        let parsed: SerperResponse = serde_json::from_str(&body).map_err(|e| {
            ScriptsmithError::from(JsonError::with_payload(
                format!("Failed to parse search response: {}", e),
                &body,
            ))
        })?;
        Ok(parsed.organic)
    }
}

#[async_trait]
impl ResearchBackend for SerperClient {
    #[instrument(skip(self), fields(service = SERVICE))]
    async fn search(&self, query: &str) -> ScriptsmithResult<Vec<SearchHit>> {
        let result = self.send(query).await;
        LlmMetrics::get().record_lookup(SERVICE, result.is_ok());
        if let Ok(hits) = &result {
            debug!(hits = hits.len(), "Search completed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_omits_unset_locale() {
        let client = SerperClient::new("k", &ResearchSettings::default()).unwrap();
        let json = serde_json::to_value(client.query("rust")).unwrap();
        assert_eq!(json["q"], "rust");
        assert_eq!(json["num"], 10);
        assert!(json.get("gl").is_none());
    }

    #[test]
    fn test_response_reads_organic_links() {
        let response: SerperResponse = serde_json::from_str(
            r#"{"searchParameters":{},"organic":[{"title":"A","snippet":"s","link":"https://a.test","position":1}]}"#,
        )
        .unwrap();
        assert_eq!(response.organic()[0].url(), "https://a.test");
    }
}
