//! Copyscape originality backend.

use crate::{CopyscapeCredentials, LlmMetrics};
use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use scriptsmith_core::{MatchedSource, OriginalityReport, OriginalitySettings};
use scriptsmith_error::{BackendError, HttpError, ScriptsmithResult};
use scriptsmith_interface::OriginalityBackend;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const SERVICE: &str = "copyscape";

#[derive(Debug, Default)]
struct ResultEntry {
    url: String,
    title: String,
    percent_matched: Option<String>,
}

/// Parse a Copyscape search response into a report.
///
/// No `<result>` elements means the text is original. Otherwise the first
/// result's `<percentmatched>` decides, and every result is listed as a
/// source.
///
/// # Errors
///
/// Returns an error for malformed XML, an `<error>` response, or a first
/// result without a match percentage.
///
/// # Examples
///
/// ```
/// use scriptsmith_models::parse_copyscape_response;
///
/// let xml = "<response><count>1</count><result><url>https://a.test</url>\
///            <title>A</title><percentmatched>12</percentmatched></result></response>";
/// let report = parse_copyscape_response(xml, 5.0).unwrap();
/// assert!(!report.passed());
/// assert_eq!(report.match_percentage(), 12.0);
/// ```
pub fn parse_copyscape_response(xml: &str, threshold: f64) -> ScriptsmithResult<OriginalityReport> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut results: Vec<ResultEntry> = Vec::new();
    let mut current: Option<ResultEntry> = None;
    let mut element: Vec<u8> = Vec::new();
    let mut service_error: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                element = e.name().as_ref().to_vec();
                if element == b"result" {
                    current = Some(ResultEntry::default());
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"result" {
                    if let Some(entry) = current.take() {
                        results.push(entry);
                    }
                }
                element.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| BackendError::new(SERVICE, format!("Invalid XML text: {}", e)))?
                    .into_owned();
                match (element.as_slice(), current.as_mut()) {
                    (b"error", _) => service_error = Some(text),
                    (b"url", Some(entry)) => entry.url = text,
                    (b"title", Some(entry)) => entry.title = text,
                    (b"percentmatched", Some(entry)) => entry.percent_matched = Some(text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BackendError::new(
                    SERVICE,
                    format!(
                        "Malformed XML at position {}: {:?}",
                        reader.buffer_position(),
                        e
                    ),
                )
                .into());
            }
            _ => {}
        }
    }

    if let Some(message) = service_error {
        return Err(BackendError::new(SERVICE, message).into());
    }

    let Some(first) = results.first() else {
        return Ok(OriginalityReport::original());
    };

    let percent = first
        .percent_matched
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .ok_or_else(|| BackendError::new(SERVICE, "First result has no match percentage"))?;

    let sources = results
        .iter()
        .map(|entry| {
            let share = entry
                .percent_matched
                .as_deref()
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            MatchedSource::new(entry.url.clone(), entry.title.clone(), share)
        })
        .collect();

    Ok(OriginalityReport::from_match(percent, threshold).with_sources(sources))
}

/// Copyscape plagiarism check client.
#[derive(Clone)]
pub struct CopyscapeClient {
    client: Client,
    credentials: CopyscapeCredentials,
    endpoint: String,
    threshold: f64,
    max_chars: usize,
    min_chars: usize,
    full_comparisons: u32,
}

impl std::fmt::Debug for CopyscapeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyscapeClient")
            .field("endpoint", &self.endpoint)
            .field("username", self.credentials.username())
            .finish_non_exhaustive()
    }
}

impl CopyscapeClient {
    /// Creates a new Copyscape client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip(credentials, settings), fields(endpoint = %settings.endpoint()))]
    pub fn new(
        credentials: CopyscapeCredentials,
        settings: &OriginalitySettings,
    ) -> ScriptsmithResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(*settings.timeout_secs()))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            endpoint: settings.endpoint().clone(),
            threshold: *settings.match_threshold(),
            max_chars: *settings.max_chars(),
            min_chars: *settings.min_chars(),
            full_comparisons: *settings.full_comparisons(),
        })
    }

    async fn submit(&self, text: &str) -> ScriptsmithResult<OriginalityReport> {
        let excerpt: String = text.chars().take(self.max_chars).collect();
        let comparisons = self.full_comparisons.to_string();
        let form = [
            ("u", self.credentials.username().as_str()),
            ("k", self.credentials.api_key().as_str()),
            ("o", "csearch"),
            ("t", excerpt.as_str()),
            ("c", comparisons.as_str()),
            ("e", "UTF-8"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(HttpError::with_status(status.as_u16(), &body).into());
        }

        parse_copyscape_response(&body, self.threshold)
    }
}

#[async_trait]
impl OriginalityBackend for CopyscapeClient {
    #[instrument(skip(self, text), fields(service = SERVICE, chars = text.chars().count()))]
    async fn check(&self, text: &str) -> OriginalityReport {
        if text.chars().count() < self.min_chars {
            debug!(min_chars = self.min_chars, "Text too short for originality check");
            return OriginalityReport::too_short(self.min_chars);
        }

        let outcome = self.submit(text).await;
        LlmMetrics::get().record_lookup(SERVICE, outcome.is_ok());

        match outcome {
            Ok(report) => {
                info!(
                    passed = report.passed(),
                    match_percentage = report.match_percentage(),
                    "Originality check completed"
                );
                report
            }
            Err(e) => {
                error!(error = %e, "Originality check failed");
                warn!("Reporting originality as unchecked");
                OriginalityReport::check_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_results_is_original() {
        let report =
            parse_copyscape_response("<response><count>0</count></response>", 5.0).unwrap();
        assert!(report.checked());
        assert!(report.passed());
        assert_eq!(report.match_percentage(), 0.0);
        assert_eq!(report.message(), "100% original");
    }

    #[test]
    fn test_low_match_passes_and_lists_sources() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <query>www.example.com</query>
  <count>2</count>
  <result>
    <index>1</index>
    <url>https://one.test/page</url>
    <title>One &amp; Only</title>
    <percentmatched>3</percentmatched>
  </result>
  <result>
    <index>2</index>
    <url>https://two.test/page</url>
    <title>Two</title>
    <percentmatched>1</percentmatched>
  </result>
</response>"#;
        let report = parse_copyscape_response(xml, 5.0).unwrap();
        assert!(report.passed());
        assert_eq!(report.match_percentage(), 3.0);
        assert_eq!(report.sources().len(), 2);
        assert_eq!(report.sources()[0].title(), "One & Only");
        assert_eq!(report.originality_score(), 97.0);
    }

    #[test]
    fn test_error_element_is_an_error() {
        let xml = "<response><error>Invalid API key</error></response>";
        let err = parse_copyscape_response(xml, 5.0).unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[test]
    fn test_missing_percentage_is_an_error() {
        let xml = "<response><result><url>https://a.test</url></result></response>";
        assert!(parse_copyscape_response(xml, 5.0).is_err());
    }
}
