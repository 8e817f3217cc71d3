//! Diaper analyzer domain definition
//!
//! Prompts, screening label table, and fixed guidance for the image analyzer.

use crate::models::DiaperCategory;
use crate::types::{AnalysisDomain, MediaKind, ScreeningLabel};

const SCREENING_PROMPT: &str = "You are screening a photo submitted to an infant-care app for stool \
analysis. Decide what the photo mainly shows. Answer with exactly one label from this list: \
DIAPER_WITH_STOOL (a real diaper with visible stool, photographed directly), \
NO_DIAPER (the photo shows something other than a diaper), \
SCREEN_OR_PRINTED (a photo of a screen, a printed picture, or an illustration), \
CLEAN_OR_EMPTY (a diaper with no visible stool), \
UNRECOGNIZED (anything else). \
You may append a confidence from 0 to 100 after the label. Reply with the label only, no other words.";

const EXTRACTION_PROMPT: &str = "This photo shows a diaper with visible stool. Assess the stool for an \
infant-care log. Respond with a single JSON object and nothing else: \
{\"category\": one of \"normal\", \"diarrhea\", \"constipation\", \"unusual_color\", \"blood_traces\", \
\"mucus\", \"no_stool\", \"unclear\", \
\"confidence\": integer 0-100, \
\"explanation\": one or two short sentences describing the visual evidence, \
\"recommendations\": up to four short practical suggestions for the parent, \
\"concern\": \"low\", \"moderate\", or \"high\"}. \
Use \"unclear\" when the photo cannot be assessed and \"no_stool\" if no stool is visible after all.";

const SCREENING_LABELS: &[ScreeningLabel] = &[
    ScreeningLabel {
        label: "DIAPER_WITH_STOOL",
        rejection: None,
    },
    ScreeningLabel {
        label: "NO_DIAPER",
        rejection: Some(
            "We couldn't find a diaper in this photo. Please photograph the open diaper directly.",
        ),
    },
    ScreeningLabel {
        label: "SCREEN_OR_PRINTED",
        rejection: Some(
            "This looks like a photo of a screen or a printed picture. Please photograph the diaper itself.",
        ),
    },
    ScreeningLabel {
        label: "CLEAN_OR_EMPTY",
        rejection: Some(
            "The diaper looks clean, so there's nothing to analyze. Try again after the next change.",
        ),
    },
    ScreeningLabel {
        label: "UNRECOGNIZED",
        rejection: Some(
            "We couldn't make out what's in this photo. Please retake it with more light.",
        ),
    },
];

const COULD_NOT_VERIFY: &str =
    "We couldn't verify this photo shows a diaper with stool. Please try again.";

const INCONCLUSIVE_EXPLANATION: &str =
    "The photo was too ambiguous to assess reliably.";

const INCONCLUSIVE_RECOMMENDATIONS: &[&str] = &[
    "Retake the photo in better light",
    "Photograph the open diaper from directly above",
    "Make sure the stool is clearly visible in the frame",
];

/// Image analyzer domain
pub struct DiaperDomain;

impl AnalysisDomain for DiaperDomain {
    type Category = DiaperCategory;

    fn kind(&self) -> MediaKind {
        MediaKind::Diaper
    }

    fn screening_prompt(&self) -> &'static str {
        SCREENING_PROMPT
    }

    fn extraction_prompt(&self) -> &'static str {
        EXTRACTION_PROMPT
    }

    fn screening_labels(&self) -> &'static [ScreeningLabel] {
        SCREENING_LABELS
    }

    fn could_not_verify_message(&self) -> &'static str {
        COULD_NOT_VERIFY
    }

    fn inconclusive_explanation(&self) -> &'static str {
        INCONCLUSIVE_EXPLANATION
    }

    fn inconclusive_recommendations(&self) -> &'static [&'static str] {
        INCONCLUSIVE_RECOMMENDATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_admissible_label() {
        let admissible: Vec<_> = SCREENING_LABELS
            .iter()
            .filter(|l| l.rejection.is_none())
            .collect();
        assert_eq!(admissible.len(), 1);
        assert_eq!(admissible[0].label, "DIAPER_WITH_STOOL");
    }

    #[test]
    fn prompts_mention_every_label() {
        for entry in SCREENING_LABELS {
            assert!(
                SCREENING_PROMPT.contains(entry.label),
                "screening prompt missing {}",
                entry.label
            );
        }
    }
}
