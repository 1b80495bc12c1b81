//! The two-stage scoring and feedback pipeline.

use crate::RepscoreConfig;
use repscore_core::{
    FeedbackPayload, FeedbackSections, NarratorVars, ScoringRequestPayload, ScoringResult,
    extract_output_text, parse_json_object,
};
use repscore_error::RepscoreResult;
use repscore_models::{ResponsesDriver, ResponsesRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Result of evaluating one practice session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Parsed scoring engine output
    pub scoring: ScoringResult,
    /// Feedback engine output, trimmed
    pub feedback_text: String,
    /// Fields for the voice agent
    pub narrator_vars: NarratorVars,
}

/// Validate a request body and run it through both engines.
///
/// The feedback call only starts once the scoring output has been parsed,
/// since its input embeds the scoring result. Any failure aborts the whole
/// evaluation; nothing partial is returned.
///
/// # Errors
///
/// - Validation error if the body has no usable transcript (no engine call is made)
/// - Configuration error if the provider credential is missing
/// - Provider error if either engine call is rejected
/// - JSON error if the scoring output holds no JSON object
#[instrument(skip_all, fields(provider = driver.provider_name(), model = driver.model_name()))]
pub async fn evaluate_session(
    driver: &dyn ResponsesDriver,
    config: &RepscoreConfig,
    body: &Value,
) -> RepscoreResult<Evaluation> {
    let session = ScoringRequestPayload::from_body(body, config.defaults())?;
    let model = config.provider().model();
    debug!(
        transcript_len = session.transcript.len(),
        model = %model,
        "Validated session"
    );

    let scoring_request =
        ResponsesRequest::new(model, config.prompts().scoring(), session.to_input()?)?;
    let scoring_response = driver.create_response(&scoring_request).await?;
    let scoring_text = extract_output_text(&scoring_response);
    debug!(text_len = scoring_text.len(), "Scoring engine responded");
    let scoring = parse_json_object(&scoring_text)?;

    let feedback_input = FeedbackPayload::new(&session, &scoring).to_input()?;
    let feedback_request =
        ResponsesRequest::new(model, config.prompts().feedback(), feedback_input)?;
    let feedback_response = driver.create_response(&feedback_request).await?;
    let feedback_text = extract_output_text(&feedback_response);
    debug!(text_len = feedback_text.len(), "Feedback engine responded");

    let sections = FeedbackSections::parse(&feedback_text);
    let narrator_vars = NarratorVars::assemble(&scoring, &sections, config.narrator());

    info!(
        score = %narrator_vars.displayed_score,
        band = %narrator_vars.band,
        highlights = sections.highlights().len(),
        "Session evaluated"
    );

    Ok(Evaluation {
        scoring,
        feedback_text,
        narrator_vars,
    })
}
