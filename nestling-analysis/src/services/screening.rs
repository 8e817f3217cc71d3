//! Admissibility screening interpretation
//!
//! **[SA-VAL-010]** Turns the screening model's reply into an admissibility
//! verdict against the domain's closed label set. Rejection messages come
//! from the domain's fixed lookup table, never from model prose. A reply that
//! matches no known label fails closed: inadmissible, generic message.

use crate::models::AdmissibilityVerdict;
use crate::types::AnalysisDomain;

/// Label used when the screening reply matched nothing in the closed set
pub const UNVERIFIED_LABEL: &str = "UNVERIFIED";

/// Interpret a screening reply against the domain's label table
pub fn interpret_screening<D: AnalysisDomain>(domain: &D, model_text: &str) -> AdmissibilityVerdict {
    let haystack = model_text.to_ascii_uppercase();

    // Earliest label occurrence wins, so a reply quoting several labels in an
    // explanation still resolves to the one the model led with.
    let mut best: Option<(usize, &crate::types::ScreeningLabel)> = None;
    for entry in domain.screening_labels() {
        if let Some(pos) = haystack.find(entry.label) {
            if best.map_or(true, |(best_pos, _)| pos < best_pos) {
                best = Some((pos, entry));
            }
        }
    }

    let Some((pos, entry)) = best else {
        tracing::warn!(
            kind = %domain.kind(),
            reply_chars = model_text.len(),
            "Screening reply matched no known label, failing closed"
        );
        return AdmissibilityVerdict::rejected(
            UNVERIFIED_LABEL,
            0,
            domain.could_not_verify_message(),
        );
    };

    let confidence = trailing_confidence(&haystack[pos + entry.label.len()..]);

    match entry.rejection {
        None => AdmissibilityVerdict::admitted(entry.label, confidence),
        Some(message) => AdmissibilityVerdict::rejected(entry.label, confidence, message),
    }
}

/// First 0-100 integer following the label, if any
fn trailing_confidence(rest: &str) -> u8 {
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse::<u32>().map(|n| n.min(100) as u8).unwrap_or(0)
}
