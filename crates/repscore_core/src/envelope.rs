//! Provider response envelope and text extraction.
//!
//! The provider's envelope shape is not contractually stable, so every level
//! is matched against the shape we expect and anything else collapses to an
//! `Other` variant instead of failing.

use serde_json::Value;
use tracing::debug;

/// A content entry inside a message item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// `{"type": "output_text", "text": "..."}`
    OutputText(String),
    /// Any other content entry (refusals, annotations, malformed entries)
    Other,
}

/// A top-level output item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputItem {
    /// `{"type": "message", "content": [...]}`
    Message(Vec<ContentItem>),
    /// Reasoning items, tool calls, or anything unrecognized
    Other,
}

/// Structured view over a provider response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelEnvelope {
    /// Output items in the order the provider returned them
    pub output: Vec<OutputItem>,
    /// Response status (e.g. "completed"), if reported
    pub status: Option<String>,
    /// Model that served the request, if reported
    pub model: Option<String>,
    /// Token usage block, passed through untouched
    pub usage: Option<Value>,
}

impl From<&Value> for ContentItem {
    fn from(value: &Value) -> Self {
        match (value.get("type").and_then(Value::as_str), value.get("text")) {
            (Some("output_text"), Some(Value::String(text))) => Self::OutputText(text.clone()),
            _ => Self::Other,
        }
    }
}

impl From<&Value> for OutputItem {
    fn from(value: &Value) -> Self {
        match (value.get("type").and_then(Value::as_str), value.get("content")) {
            (Some("message"), Some(Value::Array(content))) => {
                Self::Message(content.iter().map(ContentItem::from).collect())
            }
            _ => Self::Other,
        }
    }
}

impl From<&Value> for ModelEnvelope {
    fn from(value: &Value) -> Self {
        let output = match value.get("output") {
            Some(Value::Array(items)) => items.iter().map(OutputItem::from).collect(),
            _ => Vec::new(),
        };

        Self {
            output,
            status: value.get("status").and_then(Value::as_str).map(str::to_owned),
            model: value.get("model").and_then(Value::as_str).map(str::to_owned),
            usage: value.get("usage").cloned(),
        }
    }
}

impl ModelEnvelope {
    /// Concatenate every `output_text` fragment of every message, trimmed.
    pub fn output_text(&self) -> String {
        let mut text = String::new();
        for item in &self.output {
            if let OutputItem::Message(content) = item {
                for entry in content {
                    if let ContentItem::OutputText(fragment) = entry {
                        text.push_str(fragment);
                    }
                }
            }
        }
        text.trim().to_string()
    }
}

/// Pull the concatenated plain text out of a raw provider response.
///
/// Never fails: a missing or malformed envelope yields an empty string.
///
/// # Examples
///
/// ```
/// use repscore_core::extract_output_text;
/// use serde_json::json;
///
/// let response = json!({
///     "output": [
///         {"type": "reasoning", "summary": []},
///         {"type": "message", "content": [
///             {"type": "output_text", "text": "  Hello, "},
///             {"type": "output_text", "text": "world.  "}
///         ]}
///     ]
/// });
/// assert_eq!(extract_output_text(&response), "Hello, world.");
/// assert_eq!(extract_output_text(&json!({"output": "nope"})), "");
/// ```
pub fn extract_output_text(response: &Value) -> String {
    let envelope = ModelEnvelope::from(response);
    debug!(
        status = envelope.status.as_deref().unwrap_or("unknown"),
        model = envelope.model.as_deref().unwrap_or("unknown"),
        usage = ?envelope.usage,
        items = envelope.output.len(),
        "Extracting output text"
    );
    envelope.output_text()
}
