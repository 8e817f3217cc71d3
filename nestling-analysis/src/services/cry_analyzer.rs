//! Cry analyzer domain definition
//!
//! Prompts, screening label table, and fixed guidance for the audio analyzer.
//! All user-facing wording lives in this table so it stays stable across
//! model variants.

use crate::models::CryCategory;
use crate::types::{AnalysisDomain, MediaKind, ScreeningLabel};

const SCREENING_PROMPT: &str = "You are screening an audio clip submitted to an infant-care app. \
Decide what the clip mainly contains. Answer with exactly one label from this list: \
INFANT_CRY (a real baby crying, recorded live), \
ADULT_OR_SPEECH (adult voices, talking, singing, or an older child), \
PLAYBACK_OR_SYNTHETIC (audio played through a speaker, a recording of a recording, or generated sound), \
AMBIENT_ONLY (background noise with no clear cry), \
UNRECOGNIZED (anything else). \
You may append a confidence from 0 to 100 after the label. Reply with the label only, no other words.";

const EXTRACTION_PROMPT: &str = "This audio clip contains a confirmed infant cry. Classify the most \
likely reason for the cry from its acoustic pattern. Respond with a single JSON object and nothing else: \
{\"category\": one of \"hungry\", \"tired\", \"discomfort\", \"gas\", \"pain\", \"no_cry\", \"unclear\", \
\"confidence\": integer 0-100, \
\"explanation\": one or two short sentences describing the acoustic evidence, \
\"recommendations\": up to four short practical suggestions for the parent, \
\"concern\": \"low\", \"moderate\", or \"high\"}. \
Use \"unclear\" when the pattern is ambiguous and \"no_cry\" if there is no cry after all.";

const SCREENING_LABELS: &[ScreeningLabel] = &[
    ScreeningLabel {
        label: "INFANT_CRY",
        rejection: None,
    },
    ScreeningLabel {
        label: "ADULT_OR_SPEECH",
        rejection: Some(
            "We couldn't find an infant cry in this clip — it sounds like speech or another voice. \
             Try recording while your baby is crying.",
        ),
    },
    ScreeningLabel {
        label: "PLAYBACK_OR_SYNTHETIC",
        rejection: Some(
            "This clip sounds like audio played through a speaker. Please record your baby directly.",
        ),
    },
    ScreeningLabel {
        label: "AMBIENT_ONLY",
        rejection: Some(
            "We only heard background noise. Hold the phone closer to your baby and try again.",
        ),
    },
    ScreeningLabel {
        label: "UNRECOGNIZED",
        rejection: Some(
            "We couldn't make out what's in this clip. Please try again in a quieter environment.",
        ),
    },
];

const COULD_NOT_VERIFY: &str = "We couldn't verify this clip contains an infant cry. Please try again.";

const INCONCLUSIVE_EXPLANATION: &str =
    "The cry pattern was too ambiguous to classify reliably.";

const INCONCLUSIVE_RECOMMENDATIONS: &[&str] = &[
    "Record a longer clip of at least five seconds",
    "Reduce background noise where possible",
    "Hold the phone closer to your baby",
];

/// Audio analyzer domain
pub struct CryDomain;

impl AnalysisDomain for CryDomain {
    type Category = CryCategory;

    fn kind(&self) -> MediaKind {
        MediaKind::Cry
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
