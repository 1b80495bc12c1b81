//! Session payloads sent to the scoring and feedback engines.

use crate::{ScoringResult, is_truthy};
use derive_builder::Builder;
use repscore_error::{JsonError, RepscoreResult, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error text for a missing or unusable transcript.
pub const TRANSCRIPT_HINT: &str = r"Missing transcript. Send JSON like: { transcript: 'USER: ...\nAGENT: ...', timing:{...}, metrics:{...}, scenario:{...} }";

/// Call timing.
///
/// Serialized in camelCase for the engines; snake_case keys are accepted on
/// input so the struct can be loaded from configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Time allowed for the call, in seconds
    #[serde(default, alias = "max_seconds")]
    pub max_seconds: Option<u64>,
    /// Time the call actually took, in seconds
    #[serde(default, alias = "actual_seconds")]
    pub actual_seconds: Option<u64>,
}

/// Speech metrics measured during the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Words per minute
    #[serde(default)]
    pub wpm: Option<f64>,
    /// Filler words as a percentage of all words
    #[serde(default, alias = "filler_rate_pct")]
    pub filler_rate_pct: Option<f64>,
    /// Questions asked by the trainee
    #[serde(default, alias = "question_count")]
    pub question_count: Option<u32>,
    /// Times the trainee talked over the other party
    #[serde(default)]
    pub interruptions: Option<u32>,
}

/// Role-play scenario the call was practicing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario title
    #[serde(default)]
    pub name: String,
    /// Free-form classification tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Facts the trainee was expected to uncover
    #[serde(default, alias = "required_info")]
    pub required_info: Vec<String>,
    /// Phrases the trainee must avoid
    #[serde(default, alias = "forbidden_phrases")]
    pub forbidden_phrases: Vec<String>,
    /// The call to action the trainee should land
    #[serde(default, rename = "idealCTA", alias = "ideal_cta")]
    pub ideal_cta: String,
}

/// Objects substituted when a request omits timing, metrics or scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
pub struct SessionDefaults {
    /// Default call timing
    #[serde(default)]
    pub timing: Timing,
    /// Default speech metrics
    #[serde(default)]
    pub metrics: Metrics,
    /// Default scenario
    #[serde(default)]
    pub scenario: Scenario,
}

impl SessionDefaults {
    /// Creates a new builder for `SessionDefaults`.
    pub fn builder() -> SessionDefaultsBuilder {
        SessionDefaultsBuilder::default()
    }
}

/// Input to the scoring engine.
///
/// `timing`, `metrics` and `scenario` are kept as raw JSON: a caller-supplied
/// object is forwarded exactly as sent, never merged with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequestPayload {
    /// Call transcript, never empty
    pub transcript: String,
    /// Call timing
    pub timing: Value,
    /// Speech metrics
    pub metrics: Value,
    /// Scenario definition
    pub scenario: Value,
}

impl ScoringRequestPayload {
    /// Validate an inbound request body and fill in absent sections.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `transcript` is missing, not a string,
    /// or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_core::{ScoringRequestPayload, SessionDefaults};
    /// use serde_json::json;
    ///
    /// let defaults = SessionDefaults::default();
    /// let body = json!({"transcript": "USER: hi\nAGENT: hello", "timing": {"maxSeconds": 60}});
    /// let payload = ScoringRequestPayload::from_body(&body, &defaults).unwrap();
    /// assert_eq!(payload.timing, json!({"maxSeconds": 60}));
    /// assert_eq!(payload.metrics["wpm"], json!(null));
    ///
    /// assert!(ScoringRequestPayload::from_body(&json!({}), &defaults).is_err());
    /// ```
    pub fn from_body(body: &Value, defaults: &SessionDefaults) -> RepscoreResult<Self> {
        let transcript = match body.get("transcript") {
            Some(Value::String(t)) if !t.is_empty() => t.clone(),
            _ => return Err(ValidationError::new(TRANSCRIPT_HINT).into()),
        };

        Ok(Self {
            transcript,
            timing: section_or_default(body, "timing", &defaults.timing)?,
            metrics: section_or_default(body, "metrics", &defaults.metrics)?,
            scenario: section_or_default(body, "scenario", &defaults.scenario)?,
        })
    }

    /// Serialize as the scoring engine's input string.
    pub fn to_input(&self) -> RepscoreResult<String> {
        to_input(self)
    }
}

fn section_or_default<T: Serialize>(body: &Value, key: &str, default: &T) -> RepscoreResult<Value> {
    match body.get(key) {
        Some(value) if is_truthy(value) => Ok(value.clone()),
        _ => serde_json::to_value(default).map_err(|e| {
            JsonError::serialize(&format!("default {}", key), e).into()
        }),
    }
}

/// Input to the feedback engine: the validated session plus its scoring.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPayload<'a> {
    /// The validated scoring request
    pub session: &'a ScoringRequestPayload,
    /// The parsed scoring engine result
    pub scoring: &'a ScoringResult,
}

impl<'a> FeedbackPayload<'a> {
    /// Pair a session with its scoring result.
    pub fn new(session: &'a ScoringRequestPayload, scoring: &'a ScoringResult) -> Self {
        Self { session, scoring }
    }

    /// Serialize as the feedback engine's input string.
    pub fn to_input(&self) -> RepscoreResult<String> {
        to_input(self)
    }
}

fn to_input<T: Serialize>(payload: &T) -> RepscoreResult<String> {
    serde_json::to_string(payload)
        .map_err(|e| JsonError::serialize("payload", e).into())
}
