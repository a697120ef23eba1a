//! Entry point for loosely-typed field mappings.
//!
//! Accepts the English keys and the legacy localized ones:
//!
//! | field         | keys                       | default    |
//! |---------------|----------------------------|------------|
//! | title         | `title`, `titel`           | `"Script"` |
//! | description   | `description`, `beschreibung` | empty   |
//! | keywords      | `keywords`                 | empty      |
//! | word count    | `word_count`, `wortanzahl` | 1000       |
//! | quality tier  | `quality`, `qualitaet`     | low        |

use crate::Orchestrator;
use scriptsmith_core::{DEFAULT_TARGET_WORDS, GenerationRequest, GenerationResult, QualityTier};
use scriptsmith_error::{ScriptsmithResult, ValidationError, ValidationErrorKind};
use serde_json::{Map, Value};
use tracing::{instrument, warn};

/// Title used when the mapping has none.
pub const DEFAULT_TITLE: &str = "Script";

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| fields.get(*key))
        .filter(|value| !value.is_null())
}

fn text_field(fields: &Map<String, Value>, keys: &[&str], field: &str) -> ScriptsmithResult<Option<String>> {
    match lookup(fields, keys) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Array(items)) => Ok(Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )),
        Some(other) => Err(ValidationError::new(ValidationErrorKind::InvalidField {
            field: field.to_string(),
            reason: format!("expected text, got {}", other),
        })
        .into()),
    }
}

fn word_count_field(fields: &Map<String, Value>) -> ScriptsmithResult<u32> {
    let invalid = |reason: String| {
        ValidationError::new(ValidationErrorKind::InvalidField {
            field: "word_count".to_string(),
            reason,
        })
    };

    let words = match lookup(fields, &["word_count", "wortanzahl"]) {
        None => return Ok(DEFAULT_TARGET_WORDS),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .ok_or_else(|| invalid(format!("unsupported number {}", number)))?,
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("'{}' is not a whole number", text)))?,
        Some(other) => return Err(invalid(format!("expected a number, got {}", other)).into()),
    };
    Ok(u32::try_from(words.max(0)).unwrap_or(u32::MAX))
}

/// Build a request from a loose field mapping.
///
/// # Errors
///
/// Returns a validation error for fields of the wrong shape, such as a
/// non-numeric word count.
pub fn request_from_fields(fields: &Map<String, Value>) -> ScriptsmithResult<GenerationRequest> {
    let title = text_field(fields, &["title", "titel"], "title")?
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description =
        text_field(fields, &["description", "beschreibung"], "description")?.unwrap_or_default();
    let keywords = text_field(fields, &["keywords"], "keywords")?.unwrap_or_default();
    let quality = text_field(fields, &["quality", "qualitaet"], "quality")?
        .map(|name| QualityTier::from_loose(&name))
        .unwrap_or_default();

    Ok(GenerationRequest::new(
        title,
        description,
        keywords,
        word_count_field(fields)?,
        quality,
    ))
}

/// Generate from a loose field mapping.
///
/// Malformed fields produce a failure result rather than an error.
///
/// # Examples
///
/// ```no_run
/// use scriptsmith_pipeline::{Orchestrator, generate_from_fields};
///
/// # async fn example(orchestrator: Orchestrator) {
/// let fields = serde_json::json!({
///     "titel": "The Future of AI",
///     "beschreibung": "Exploring AI trends",
///     "wortanzahl": "500",
///     "qualitaet": "bronze",
/// });
/// let result = generate_from_fields(&orchestrator, fields.as_object().unwrap()).await;
/// # }
/// ```
#[instrument(skip_all, fields(keys = fields.len()))]
pub async fn generate_from_fields(
    orchestrator: &Orchestrator,
    fields: &Map<String, Value>,
) -> GenerationResult {
    match request_from_fields(fields) {
        Ok(request) => orchestrator.generate(&request).await,
        Err(e) => {
            warn!(error = %e, "Rejected field mapping");
            let title = lookup(fields, &["title", "titel"])
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_TITLE);
            GenerationResult::failure(title, QualityTier::default(), e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_localized_keys() {
        let request = request_from_fields(&map(json!({
            "titel": "Die Zukunft",
            "beschreibung": "Trends",
            "keywords": "KI",
            "wortanzahl": "700",
            "qualitaet": "Gold",
        })))
        .unwrap();
        assert_eq!(request.title(), "Die Zukunft");
        assert_eq!(request.description(), "Trends");
        assert_eq!(*request.target_word_count(), 700);
        assert_eq!(*request.quality_tier(), QualityTier::High);
    }

    #[test]
    fn test_defaults() {
        let request = request_from_fields(&Map::new()).unwrap();
        assert_eq!(request.title(), DEFAULT_TITLE);
        assert_eq!(*request.target_word_count(), 1_000);
        assert_eq!(*request.quality_tier(), QualityTier::Low);
    }

    #[test]
    fn test_numbers_clamped_and_unknown_tier_is_low() {
        let request = request_from_fields(&map(json!({
            "title": "T",
            "word_count": 40_000,
            "quality": "platinum",
            "keywords": ["a", "b"],
        })))
        .unwrap();
        assert_eq!(*request.target_word_count(), 18_000);
        assert_eq!(*request.quality_tier(), QualityTier::Low);
        assert_eq!(request.keywords(), "a, b");
    }

    #[test]
    fn test_non_numeric_word_count_is_rejected() {
        let err = request_from_fields(&map(json!({"word_count": "lots"}))).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("lots"));
    }
}
