//! Verdict types produced by the two pipeline stages
//!
//! **[SA-VAL-020]** Admissibility verdict (screening stage output)
//! **[SA-EXT-030]** Classification verdict (extraction stage output)

use serde::Serialize;

use crate::types::{CategoryLabel, ConcernLevel};

/// Confidence assigned to conservative-default verdicts: mid-range, below
/// nothing and above nothing, so downstream consumers treat it as "unknown"
pub const DEFAULT_VERDICT_CONFIDENCE: u8 = 50;

/// Screening stage output
///
/// Rejection is a successful outcome, not a failure mode: an inadmissible
/// sample short-circuits the pipeline with a fixed user-facing message.
#[derive(Debug, Clone)]
pub struct AdmissibilityVerdict {
    pub admissible: bool,
    /// Screening label the model answered with (or `UNVERIFIED` on parse failure)
    pub subject_label: String,
    /// 0-100 confidence parsed from the screening reply; 0 when absent.
    /// Logged for diagnostics; admission is decided by the label alone.
    pub confidence: u8,
    /// Fixed rejection message; `None` when admissible
    pub rejection_message: Option<String>,
}

impl AdmissibilityVerdict {
    pub fn admitted(subject_label: impl Into<String>, confidence: u8) -> Self {
        Self {
            admissible: true,
            subject_label: subject_label.into(),
            confidence,
            rejection_message: None,
        }
    }

    pub fn rejected(
        subject_label: impl Into<String>,
        confidence: u8,
        message: impl Into<String>,
    ) -> Self {
        Self {
            admissible: false,
            subject_label: subject_label.into(),
            confidence,
            rejection_message: Some(message.into()),
        }
    }
}

/// Extraction stage output, post-processed once by the decision policy
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationVerdict<C> {
    pub category: C,
    /// 0-100
    pub confidence: u8,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub concern: ConcernLevel,
    /// Derived: true iff `category` is not a sentinel label. Computed locally,
    /// overriding anything the model text implied.
    pub is_positive: bool,
}

impl<C: CategoryLabel> ClassificationVerdict<C> {
    /// Build a verdict, deriving `is_positive` from sentinel membership
    pub fn from_parts(
        category: C,
        confidence: u8,
        explanation: String,
        recommendations: Vec<String>,
        concern: ConcernLevel,
    ) -> Self {
        Self {
            category,
            confidence,
            explanation,
            recommendations,
            concern,
            is_positive: !category.is_sentinel(),
        }
    }

    /// Conservative default used when the model output has no parseable
    /// structure: indeterminate sentinel, mid-range confidence, fixed guidance
    pub fn inconclusive(explanation: &str, recommendations: &[&str]) -> Self {
        Self {
            category: C::indeterminate(),
            confidence: DEFAULT_VERDICT_CONFIDENCE,
            explanation: explanation.to_string(),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
            concern: ConcernLevel::Low,
            is_positive: false,
        }
    }
}

/// Tagged pipeline outcome
///
/// **[SA-WF-030]** Callers can never confuse "the sample was rejected" with
/// "the pipeline failed": rejections live here, failures live in the error
/// channel of the surrounding `Result`.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome<C> {
    /// Sample was inadmissible; fixed rejection message, nothing persisted
    Rejected { message: String },
    /// A full verdict (possibly negative or downgraded)
    Verdict(ClassificationVerdict<C>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CryCategory;

    #[test]
    fn positive_detection_derived_from_sentinels() {
        let verdict = ClassificationVerdict::from_parts(
            CryCategory::Hungry,
            82,
            "rhythmic low-pitched cry".to_string(),
            vec!["Offer a feed".to_string()],
            ConcernLevel::Low,
        );
        assert!(verdict.is_positive);

        let verdict = ClassificationVerdict::from_parts(
            CryCategory::NoCry,
            90,
            String::new(),
            vec![],
            ConcernLevel::Low,
        );
        assert!(!verdict.is_positive);
    }

    #[test]
    fn inconclusive_default_is_not_positive() {
        let verdict: ClassificationVerdict<CryCategory> =
            ClassificationVerdict::inconclusive("inconclusive", &["try again"]);
        assert_eq!(verdict.category, CryCategory::Unclear);
        assert_eq!(verdict.confidence, DEFAULT_VERDICT_CONFIDENCE);
        assert!(!verdict.is_positive);
        assert_eq!(verdict.concern, ConcernLevel::Low);
    }
}
