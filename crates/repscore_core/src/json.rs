//! Tolerant JSON object parsing for model output.

use crate::ScoringResult;
use repscore_error::{JsonError, RepscoreResult};
use serde_json::Value;
use tracing::{debug, instrument};

/// Message carried by the error when no JSON object can be recovered.
pub const PARSE_FAILURE: &str = "Could not parse JSON from model output.";

/// Parse a JSON object out of model output that may be wrapped in prose.
///
/// Tries the whole text first. If that fails (or is not an object), parses
/// the span from the first `{` to the last `}` inclusive. Anything beyond
/// that is reported as a parse failure.
///
/// # Examples
///
/// ```
/// use repscore_core::parse_json_object;
/// use serde_json::json;
///
/// let direct = parse_json_object(r#"{"a":1}"#).unwrap();
/// assert_eq!(direct.get("a"), Some(&json!(1)));
///
/// let wrapped = parse_json_object(r#"Sure, here it is: {"a":1} — done"#).unwrap();
/// assert_eq!(wrapped.get("a"), Some(&json!(1)));
///
/// assert!(parse_json_object("no json here").is_err());
/// ```
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_json_object(text: &str) -> RepscoreResult<ScoringResult> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => return Ok(fields.into()),
        Ok(other) => debug!(kind = value_kind(&other), "Direct parse was not an object"),
        Err(e) => debug!(error = %e, "Direct parse failed, trying brace recovery"),
    }

    let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) else {
        return Err(JsonError::new(PARSE_FAILURE).into());
    };
    if first >= last {
        return Err(JsonError::new(PARSE_FAILURE).into());
    }

    match serde_json::from_str::<Value>(&text[first..=last]) {
        Ok(Value::Object(fields)) => {
            debug!(start = first, end = last, "Recovered JSON object from surrounding text");
            Ok(fields.into())
        }
        Ok(other) => Err(JsonError::new(format!(
            "{} Recovered value is {}, not an object.",
            PARSE_FAILURE,
            value_kind(&other)
        ))
        .into()),
        Err(e) => Err(JsonError::new(format!("{} {}", PARSE_FAILURE, e)).into()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
