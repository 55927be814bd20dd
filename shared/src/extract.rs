//! Extraction of structured payloads from free-text model output
//!
//! Language models tend to wrap JSON in a fenced code block surrounded by prose.
//! The extractor isolates that block (or takes the whole reply when there is no
//! fence) and parses it strictly. Failure is a value, never a panic: callers
//! match on [`Extraction`] and run their deterministic fallback.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Outcome of pulling a structured payload out of model text
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    /// The payload parsed into the requested shape
    Parsed(T),
    /// Nothing usable was found; the caller must supply a fallback
    FallbackRequired(ExtractionFailure),
}

/// Why extraction failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("model returned no text")]
    Empty,

    #[error("code fence opened but never closed")]
    UnterminatedFence,

    #[error("payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("payload has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

impl<T> Extraction<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }

    /// Discard the failure reason
    pub fn ok(self) -> Option<T> {
        match self {
            Extraction::Parsed(value) => Some(value),
            Extraction::FallbackRequired(_) => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Extraction<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Extraction::Parsed(value) => Extraction::Parsed(f(value)),
            Extraction::FallbackRequired(failure) => Extraction::FallbackRequired(failure),
        }
    }
}

impl<T> From<Result<T, ExtractionFailure>> for Extraction<T> {
    fn from(result: Result<T, ExtractionFailure>) -> Self {
        match result {
            Ok(value) => Extraction::Parsed(value),
            Err(failure) => Extraction::FallbackRequired(failure),
        }
    }
}

/// Locate the JSON payload inside model text.
///
/// With a fence present, returns the trimmed text between the opening fence
/// (minus an optional `json` tag) and the next closing fence. Without one,
/// returns the whole trimmed text.
pub fn fenced_payload(text: &str) -> Result<&str, ExtractionFailure> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionFailure::Empty);
    }

    let Some(open) = text.find(FENCE) else {
        return Ok(text);
    };

    let mut body = &text[open + FENCE.len()..];
    if body
        .get(..JSON_TAG.len())
        .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
    {
        body = &body[JSON_TAG.len()..];
    }

    let close = body.find(FENCE).ok_or(ExtractionFailure::UnterminatedFence)?;
    Ok(body[..close].trim())
}

/// Extract an untyped JSON value from model text
pub fn extract_json(text: &str) -> Extraction<Value> {
    fenced_payload(text)
        .and_then(|payload| {
            serde_json::from_str::<Value>(payload)
                .map_err(|e| ExtractionFailure::Malformed(e.to_string()))
        })
        .into()
}

/// Extract model text into a typed reply
pub fn extract_as<T: DeserializeOwned>(text: &str) -> Extraction<T> {
    match extract_json(text) {
        Extraction::Parsed(value) => serde_json::from_value::<T>(value)
            .map_err(|e| ExtractionFailure::UnexpectedShape(e.to_string()))
            .into(),
        Extraction::FallbackRequired(failure) => Extraction::FallbackRequired(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        crop_name: String,
    }

    #[test]
    fn test_fenced_object_is_returned_exactly() {
        let text = "Here you go:\n```json\n{\"crop_name\": \"Wheat\", \"score\": 7}\n```\nGood luck!";
        assert_eq!(
            extract_json(text),
            Extraction::Parsed(json!({"crop_name": "Wheat", "score": 7}))
        );
    }

    #[test]
    fn test_bare_json_without_fence() {
        let text = "  [{\"crop_name\": \"Rice\"}]  ";
        assert_eq!(extract_json(text), Extraction::Parsed(json!([{"crop_name": "Rice"}])));
    }

    #[test]
    fn test_untagged_and_uppercase_fences() {
        assert!(extract_json("```\n{\"a\": 1}\n```").is_parsed());
        assert!(extract_json("```JSON\n{\"a\": 1}\n```").is_parsed());
    }

    #[test]
    fn test_prose_fails_as_malformed() {
        let extraction = extract_json("Plant maize and beans this season.");
        assert!(matches!(
            extraction,
            Extraction::FallbackRequired(ExtractionFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_unterminated_fence_fails_explicitly() {
        let extraction = extract_json("```json\n{\"crop_name\": \"Wheat\"}");
        assert_eq!(
            extraction,
            Extraction::FallbackRequired(ExtractionFailure::UnterminatedFence)
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(
            extract_json("   \n"),
            Extraction::FallbackRequired(ExtractionFailure::Empty)
        );
    }

    #[test]
    fn test_partial_json_fails() {
        let extraction = extract_json("```json\n{\"crop_name\": \"Wh\n```");
        assert!(!extraction.is_parsed());
    }

    #[test]
    fn test_typed_extraction_shape_mismatch() {
        let extraction = extract_as::<Vec<Reply>>("{\"crop_name\": \"Wheat\"}");
        assert!(matches!(
            extraction,
            Extraction::FallbackRequired(ExtractionFailure::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_typed_extraction() {
        let extraction = extract_as::<Vec<Reply>>("```json\n[{\"crop_name\": \"Millet\"}]\n```");
        assert_eq!(
            extraction.ok(),
            Some(vec![Reply {
                crop_name: "Millet".to_string()
            }])
        );
    }

    #[test]
    fn test_multibyte_text_after_fence() {
        assert!(!extract_json("```é").is_parsed());
    }

    proptest! {
        #[test]
        fn prop_never_panics(text in any::<String>()) {
            let _ = extract_json(&text);
        }

        #[test]
        fn prop_fenced_object_recovered(
            fields in prop::collection::btree_map("[a-z_]{1,12}", any::<i32>(), 0..6),
            prefix in "[A-Za-z ,.]{0,40}",
            suffix in "[A-Za-z ,.]{0,40}",
        ) {
            let object = serde_json::to_value(&fields).unwrap();
            let text = format!("{}\n```json\n{}\n```\n{}", prefix, object, suffix);
            prop_assert_eq!(extract_json(&text), Extraction::Parsed(object));
        }
    }
}
