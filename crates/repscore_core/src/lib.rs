//! Core data types and response parsing for Repscore.
//!
//! This crate holds everything between the HTTP surface and the provider
//! client that does not touch the network:
//!
//! - Session payloads and their configurable defaults
//! - Text extraction from the provider's response envelope
//! - Tolerant JSON parsing of the scoring engine output
//! - Heuristic section parsing of the feedback engine output
//! - Narrator variable assembly for the voice agent

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod envelope;
mod feedback;
mod json;
mod narrator;
mod payload;
mod scoring;
mod value;

pub use envelope::{ContentItem, ModelEnvelope, OutputItem, extract_output_text};
pub use feedback::FeedbackSections;
pub use json::{PARSE_FAILURE, parse_json_object};
pub use narrator::{NarratorPhrases, NarratorPhrasesBuilder, NarratorVars};
pub use payload::{
    FeedbackPayload, Metrics, Scenario, ScoringRequestPayload, SessionDefaults,
    SessionDefaultsBuilder, TRANSCRIPT_HINT, Timing,
};
pub use scoring::ScoringResult;
pub use value::is_truthy;
