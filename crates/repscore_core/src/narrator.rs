//! Narrator variables for the voice agent.

use crate::{FeedbackSections, ScoringResult};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed phrases used when assembling narrator variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, derive_getters::Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct NarratorPhrases {
    /// Spoken when the session is a personal best
    personal_best_line: String,
    /// Prepended to the first badge name
    badge_prefix: String,
    /// Summary used when the feedback had no highlights
    summary_fallback: String,
}

impl Default for NarratorPhrases {
    fn default() -> Self {
        Self {
            personal_best_line: "Personal best achieved.".to_string(),
            badge_prefix: "Badge unlocked: ".to_string(),
            summary_fallback: "Solid work. Keep building consistency rep to rep.".to_string(),
        }
    }
}

impl NarratorPhrases {
    /// Creates a new builder for `NarratorPhrases`.
    pub fn builder() -> NarratorPhrasesBuilder {
        NarratorPhrasesBuilder::default()
    }
}

/// Flat field set read aloud by the voice agent.
///
/// Only the summary has a fallback; strengths, improvements and next step are
/// left empty when the feedback lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NarratorVars {
    /// Score as reported by the scoring engine
    pub displayed_score: Value,
    /// Performance band as reported by the scoring engine
    pub band: Value,
    /// Personal best sentence or empty
    pub optional_personal_best_line: String,
    /// First badge sentence or empty
    pub optional_badge_line: String,
    /// First two highlights, or the fallback sentence
    pub evaluation_summary: String,
    /// All highlights
    pub evaluation_strengths: String,
    /// All growth items
    pub evaluation_improvements: String,
    /// The next rep challenge
    pub evaluation_next_step: String,
}

impl NarratorVars {
    /// Map scoring and feedback onto narrator fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_core::{FeedbackSections, NarratorPhrases, NarratorVars, parse_json_object};
    ///
    /// let scoring = parse_json_object(r#"{"displayedScore": 71, "band": "Developing"}"#).unwrap();
    /// let sections = FeedbackSections::parse("Growth Focus:\n- Ask for the meeting");
    /// let vars = NarratorVars::assemble(&scoring, &sections, &NarratorPhrases::default());
    /// assert_eq!(vars.evaluation_improvements, "Ask for the meeting");
    /// assert_eq!(vars.evaluation_summary, "Solid work. Keep building consistency rep to rep.");
    /// ```
    pub fn assemble(
        scoring: &ScoringResult,
        sections: &FeedbackSections,
        phrases: &NarratorPhrases,
    ) -> Self {
        let highlights = sections.highlights();

        let optional_personal_best_line = if scoring.personal_best() {
            phrases.personal_best_line.clone()
        } else {
            String::new()
        };

        let optional_badge_line = scoring
            .first_badge_name()
            .map(|name| format!("{}{}", phrases.badge_prefix, name))
            .unwrap_or_default();

        let evaluation_summary = if highlights.is_empty() {
            phrases.summary_fallback.clone()
        } else {
            highlights
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        };

        Self {
            displayed_score: scoring.displayed_score(),
            band: scoring.band(),
            optional_personal_best_line,
            optional_badge_line,
            evaluation_summary,
            evaluation_strengths: highlights.join(" "),
            evaluation_improvements: sections.growth().join(" "),
            evaluation_next_step: sections.challenge().clone(),
        }
    }
}
