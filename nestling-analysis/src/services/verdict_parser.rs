//! Structured verdict recovery from free-form model text
//!
//! **[SA-EXT-020]** The provider is not trusted to return pure JSON: replies
//! arrive wrapped in prose, markdown fences, or partial garbage. The contract
//! has exactly two paths: a strict parse of the first well-formed JSON object
//! that matches the verdict shape, or `None` — the caller substitutes the
//! single conservative default. No other fallback exists.

use serde::Deserialize;

use crate::models::ClassificationVerdict;
use crate::types::{CategoryLabel, ConcernLevel};

/// Raw shape the extraction prompt instructs the model to emit
#[derive(Debug, Deserialize)]
struct RawVerdict {
    category: String,
    confidence: f64,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default, alias = "urgency")]
    concern: Option<String>,
}

/// Parse the first well-formed verdict object out of model text
///
/// Returns `None` when no balanced JSON block parses into the expected shape
/// with a known category label. `is_positive` is derived from sentinel
/// membership here, overriding anything the model text implied.
pub fn parse_verdict<C: CategoryLabel>(text: &str) -> Option<ClassificationVerdict<C>> {
    for start in brace_positions(text) {
        let Some(block) = balanced_block(text, start) else {
            continue;
        };
        let Ok(raw) = serde_json::from_str::<RawVerdict>(block) else {
            continue;
        };
        let Some(category) = C::parse(&raw.category) else {
            continue;
        };

        let confidence = raw.confidence.clamp(0.0, 100.0).round() as u8;
        let concern = raw
            .concern
            .as_deref()
            .and_then(ConcernLevel::parse)
            .unwrap_or(if category.is_sentinel() {
                ConcernLevel::Low
            } else {
                ConcernLevel::Moderate
            });

        return Some(ClassificationVerdict::from_parts(
            category,
            confidence,
            raw.explanation,
            raw.recommendations,
            concern,
        ));
    }

    None
}

/// Byte offsets of every `{` outside the first candidate's scope
fn brace_positions(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.char_indices().filter(|(_, c)| *c == '{').map(|(i, _)| i)
}

/// Slice of the balanced `{...}` block starting at `start`, honoring JSON
/// string and escape rules; `None` if the block never closes
fn balanced_block(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CryCategory;

    #[test]
    fn parses_bare_json() {
        let text = r#"{"category": "hungry", "confidence": 82, "explanation": "rhythmic cry", "recommendations": ["Offer a feed"], "concern": "low"}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();

        assert_eq!(verdict.category, CryCategory::Hungry);
        assert_eq!(verdict.confidence, 82);
        assert_eq!(verdict.explanation, "rhythmic cry");
        assert_eq!(verdict.recommendations, vec!["Offer a feed"]);
        assert_eq!(verdict.concern, ConcernLevel::Low);
        assert!(verdict.is_positive);
    }

    #[test]
    fn parses_json_inside_prose_and_fences() {
        let text = "Sure! Here is the analysis you asked for:\n```json\n{\"category\": \"pain\", \"confidence\": 91, \"explanation\": \"sudden high-pitched bursts\", \"recommendations\": [], \"concern\": \"high\"}\n```\nLet me know if you need more.";
        let verdict = parse_verdict::<CryCategory>(text).unwrap();

        assert_eq!(verdict.category, CryCategory::Pain);
        assert_eq!(verdict.concern, ConcernLevel::High);
    }

    #[test]
    fn skips_non_verdict_objects() {
        let text = r#"{"note": "preamble"} then {"category": "tired", "confidence": 60}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.category, CryCategory::Tired);
    }

    #[test]
    fn unknown_category_is_a_parse_failure() {
        let text = r#"{"category": "screaming", "confidence": 80}"#;
        assert!(parse_verdict::<CryCategory>(text).is_none());
    }

    #[test]
    fn garbage_yields_none() {
        assert!(parse_verdict::<CryCategory>("I could not process this audio.").is_none());
        assert!(parse_verdict::<CryCategory>("{\"category\": \"hungry\"").is_none());
        assert!(parse_verdict::<CryCategory>("").is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        let text = r#"{"category": "hungry", "confidence": 250}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.confidence, 100);

        let text = r#"{"category": "hungry", "confidence": -3}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.confidence, 0);
    }

    #[test]
    fn urgency_alias_is_accepted() {
        let text = r#"{"category": "gas", "confidence": 70, "urgency": "moderate"}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.concern, ConcernLevel::Moderate);
    }

    #[test]
    fn missing_concern_defaults_by_sentinel_membership() {
        let text = r#"{"category": "hungry", "confidence": 70}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.concern, ConcernLevel::Moderate);

        let text = r#"{"category": "no_cry", "confidence": 70}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.concern, ConcernLevel::Low);
        assert!(!verdict.is_positive);
    }

    #[test]
    fn braces_inside_strings_do_not_break_scanning() {
        let text = r#"{"category": "hungry", "confidence": 55, "explanation": "pattern {rising} with \"pauses\""}"#;
        let verdict = parse_verdict::<CryCategory>(text).unwrap();
        assert_eq!(verdict.explanation, "pattern {rising} with \"pauses\"");
    }
}
