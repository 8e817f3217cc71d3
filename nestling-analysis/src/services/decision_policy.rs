//! Verdict decision policy
//!
//! **[SA-POL-010]** A positive classification the model itself is not
//! confident in is worse than no detection: a wrong "pain" or "blood_traces"
//! entry in a parent's history costs far more than a missed one. Below the
//! floor, the verdict is reclassified to the indeterminate sentinel with
//! fixed retry guidance before anything is returned or persisted.

use crate::models::ClassificationVerdict;
use crate::types::{CategoryLabel, ConcernLevel};

/// Confidence floor below which a positive detection is downgraded.
/// One cutoff shared by both analyzers.
pub const CONFIDENCE_FLOOR: u8 = 50;

/// Apply the confidence floor to a parsed verdict
///
/// Pure and synchronous; the single mutation a verdict undergoes between
/// extraction and the caller. Non-positive verdicts pass through untouched.
pub fn apply<C: CategoryLabel>(
    verdict: ClassificationVerdict<C>,
    inconclusive_explanation: &str,
    inconclusive_recommendations: &[&str],
) -> ClassificationVerdict<C> {
    if !verdict.is_positive || verdict.confidence >= CONFIDENCE_FLOOR {
        return verdict;
    }

    tracing::info!(
        category = verdict.category.as_str(),
        confidence = verdict.confidence,
        "Downgrading low-confidence positive detection"
    );

    ClassificationVerdict {
        category: C::indeterminate(),
        confidence: verdict.confidence,
        explanation: inconclusive_explanation.to_string(),
        recommendations: inconclusive_recommendations
            .iter()
            .map(|r| r.to_string())
            .collect(),
        concern: ConcernLevel::Low,
        is_positive: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CryCategory, DiaperCategory};

    const EXPLANATION: &str = "inconclusive";
    const RECOMMENDATIONS: &[&str] = &["try again"];

    fn cry(category: CryCategory, confidence: u8) -> ClassificationVerdict<CryCategory> {
        ClassificationVerdict::from_parts(
            category,
            confidence,
            "model explanation".to_string(),
            vec!["model advice".to_string()],
            ConcernLevel::High,
        )
    }

    #[test]
    fn low_confidence_positive_is_downgraded() {
        let verdict = apply(cry(CryCategory::Pain, 35), EXPLANATION, RECOMMENDATIONS);

        assert_eq!(verdict.category, CryCategory::Unclear);
        assert!(!verdict.is_positive);
        assert_eq!(verdict.confidence, 35);
        assert_eq!(verdict.explanation, EXPLANATION);
        assert_eq!(verdict.recommendations, vec!["try again"]);
        assert_eq!(verdict.concern, ConcernLevel::Low);
    }

    #[test]
    fn confident_positive_passes_through_unchanged() {
        let verdict = apply(cry(CryCategory::Hungry, 82), EXPLANATION, RECOMMENDATIONS);

        assert_eq!(verdict.category, CryCategory::Hungry);
        assert!(verdict.is_positive);
        assert_eq!(verdict.explanation, "model explanation");
        assert_eq!(verdict.concern, ConcernLevel::High);
    }

    #[test]
    fn floor_boundary_is_inclusive_pass() {
        let verdict = apply(cry(CryCategory::Tired, CONFIDENCE_FLOOR), EXPLANATION, RECOMMENDATIONS);
        assert!(verdict.is_positive);

        let verdict = apply(
            cry(CryCategory::Tired, CONFIDENCE_FLOOR - 1),
            EXPLANATION,
            RECOMMENDATIONS,
        );
        assert!(!verdict.is_positive);
    }

    #[test]
    fn sentinel_verdicts_are_never_touched() {
        let verdict = apply(cry(CryCategory::NoCry, 10), EXPLANATION, RECOMMENDATIONS);
        assert_eq!(verdict.category, CryCategory::NoCry);
        assert_eq!(verdict.explanation, "model explanation");
    }

    #[test]
    fn same_floor_applies_to_both_domains() {
        let verdict = ClassificationVerdict::from_parts(
            DiaperCategory::BloodTraces,
            35,
            "possible streaks".to_string(),
            vec![],
            ConcernLevel::High,
        );
        let verdict = apply(verdict, EXPLANATION, RECOMMENDATIONS);

        assert_eq!(verdict.category, DiaperCategory::Unclear);
        assert!(!verdict.is_positive);
    }
}
