//! Scoring engine result.

use crate::is_truthy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed scoring engine output.
///
/// An open mapping: only a handful of keys are read, the rest pass through
/// to the response and into the feedback engine payload untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringResult(Map<String, Value>);

impl ScoringResult {
    /// Wrap an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up any key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// `displayedScore`, verbatim. Missing reads as `null`.
    pub fn displayed_score(&self) -> Value {
        self.get("displayedScore").cloned().unwrap_or(Value::Null)
    }

    /// `band`, verbatim. Missing reads as `null`.
    pub fn band(&self) -> Value {
        self.get("band").cloned().unwrap_or(Value::Null)
    }

    /// Whether `personalBest` is present and truthy.
    pub fn personal_best(&self) -> bool {
        self.get("personalBest").is_some_and(is_truthy)
    }

    /// Name of the first awarded badge.
    ///
    /// Returns `None` when `badgesAwarded` is missing, not a list, empty, or
    /// its first entry has no usable name.
    pub fn first_badge_name(&self) -> Option<String> {
        let badge = self.get("badgesAwarded")?.as_array()?.first()?;
        match badge.get("name")? {
            Value::Null => None,
            Value::String(name) => Some(name.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for ScoringResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
