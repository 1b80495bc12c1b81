//! Section parsing for feedback engine prose.
//!
//! The feedback prompt asks for three labeled sections:
//!
//! ```text
//! Highlights — bullets
//! Growth Focus — bullets
//! Next Rep Challenge — one line
//! ```
//!
//! Models drift on delimiters and bullet styles, so headers are matched by
//! prefix and the parser never fails; unrecognized text simply lands nowhere.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, instrument};

// Word boundary is ASCII-only: `Highlightsé:` is still a header.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(highlights|growth focus|next rep challenge)(?-u:\b)")
        .expect("Valid header regex")
});

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+").expect("Valid bullet regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Highlights,
    Growth,
    Challenge,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        let captures = HEADER.captures(line)?;
        match captures[1].to_lowercase().as_str() {
            "highlights" => Some(Self::Highlights),
            "growth focus" => Some(Self::Growth),
            "next rep challenge" => Some(Self::Challenge),
            _ => None,
        }
    }
}

/// Feedback text split into its three buckets.
///
/// Every field is always present; sections that were not found are empty.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct FeedbackSections {
    /// Lines under "Highlights", bullet markers stripped
    highlights: Vec<String>,
    /// Lines under "Growth Focus", bullet markers stripped
    growth: Vec<String>,
    /// Lines under "Next Rep Challenge", joined with single spaces
    challenge: String,
}

impl FeedbackSections {
    /// Split free-form feedback into highlights, growth and challenge.
    ///
    /// Lines before the first recognized header are dropped. A header line
    /// switches the current section and is not itself content, even when the
    /// header carries trailing text (`Highlights: great call`).
    ///
    /// # Examples
    ///
    /// ```
    /// use repscore_core::FeedbackSections;
    ///
    /// let text = "Highlights:\n- Great pacing\n• Strong opening\n\
    ///             Growth Focus —\n* Ask more questions\n\
    ///             Next Rep Challenge:\nAsk for the budget\ndirectly.";
    /// let sections = FeedbackSections::parse(text);
    /// assert_eq!(sections.highlights(), &["Great pacing", "Strong opening"]);
    /// assert_eq!(sections.growth(), &["Ask more questions"]);
    /// assert_eq!(sections.challenge(), "Ask for the budget directly.");
    /// ```
    #[instrument(skip(text), fields(text_len = text.len()))]
    pub fn parse(text: &str) -> Self {
        let mut sections = Self::default();
        let mut current: Option<Section> = None;

        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(section) = Section::from_header(line) {
                current = Some(section);
                continue;
            }

            let cleaned = BULLET.replace(line, "");
            match current {
                Some(Section::Highlights) => sections.highlights.push(cleaned.into_owned()),
                Some(Section::Growth) => sections.growth.push(cleaned.into_owned()),
                Some(Section::Challenge) => {
                    if !sections.challenge.is_empty() {
                        sections.challenge.push(' ');
                    }
                    sections.challenge.push_str(&cleaned);
                }
                None => {}
            }
        }

        debug!(
            highlights = sections.highlights.len(),
            growth = sections.growth.len(),
            has_challenge = !sections.challenge.is_empty(),
            "Parsed feedback sections"
        );
        sections
    }

    /// Whether no section produced any content.
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.growth.is_empty() && self.challenge.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_layout() {
        let text = "Highlights:\n- Great pacing\n- Strong opening\nGrowth Focus:\n- Ask more questions\nNext Rep Challenge:\nAsk for the budget directly.\n";
        let sections = FeedbackSections::parse(text);
        assert_eq!(sections.highlights(), &["Great pacing", "Strong opening"]);
        assert_eq!(sections.growth(), &["Ask more questions"]);
        assert_eq!(sections.challenge(), "Ask for the budget directly.");
    }

    #[test]
    fn test_no_headers_yields_empty_sections() {
        let sections = FeedbackSections::parse("Nice call overall.\n- keep it up\n");
        assert!(sections.highlights().is_empty());
        assert!(sections.growth().is_empty());
        assert_eq!(sections.challenge(), "");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(FeedbackSections::parse(""), FeedbackSections::default());
    }

    #[test]
    fn test_sections_in_any_order_and_case() {
        let text = "NEXT REP CHALLENGE — Open with a question.\nhighlights\n* Warm tone\ngrowth focus - \n• Slow down";
        let sections = FeedbackSections::parse(text);
        assert_eq!(sections.highlights(), &["Warm tone"]);
        assert_eq!(sections.growth(), &["Slow down"]);
        assert_eq!(sections.challenge(), "");
    }

    #[test]
    fn test_preamble_is_dropped_and_whitespace_trimmed() {
        let text = "Here is your coaching:\r\n\r\n   Highlights:  \r\n   -   Clear agenda  \r\n";
        let sections = FeedbackSections::parse(text);
        assert_eq!(sections.highlights(), &["Clear agenda"]);
    }

    #[test]
    fn test_only_one_bullet_is_stripped() {
        let sections = FeedbackSections::parse("Highlights\n- - nested\n-no space\n");
        assert_eq!(sections.highlights(), &["- nested", "-no space"]);
    }

    #[test]
    fn test_header_prefix_needs_word_boundary() {
        let sections = FeedbackSections::parse("Highlights:\nHighlightsreel was fun\n");
        assert_eq!(sections.highlights(), &["Highlightsreel was fun"]);
    }

    #[test]
    fn test_header_boundary_is_ascii() {
        let sections = FeedbackSections::parse("Highlightsé:\n- a\nGrowth Focusñ\n- b\n");
        assert_eq!(sections.highlights(), &["a"]);
        assert_eq!(sections.growth(), &["b"]);
    }

    #[test]
    fn test_multi_line_challenge_is_space_joined() {
        let sections =
            FeedbackSections::parse("Next Rep Challenge:\n- Ask about timeline.\n- Then budget.");
        assert_eq!(sections.challenge(), "Ask about timeline. Then budget.");
    }

    #[test]
    fn test_repeated_header_appends() {
        let sections = FeedbackSections::parse("Highlights:\n- a\nGrowth Focus:\n- b\nHighlights:\n- c");
        assert_eq!(sections.highlights(), &["a", "c"]);
        assert_eq!(sections.growth(), &["b"]);
    }
}
