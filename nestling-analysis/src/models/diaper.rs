//! Diaper/stool classification categories
//!
//! Closed label set for the image analyzer. `NoStool` and `Unclear` are the
//! sentinel "no signal" labels. `Normal` is a substantive classification:
//! stool is present and looks typical, which is a real (and recordable)
//! assessment, not an absence of signal.

use serde::{Deserialize, Serialize};

use crate::types::CategoryLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperCategory {
    Normal,
    Diarrhea,
    Constipation,
    UnusualColor,
    BloodTraces,
    Mucus,
    /// No stool visible in the photo
    NoStool,
    /// Stool may be present but cannot be assessed
    Unclear,
}

impl CategoryLabel for DiaperCategory {
    fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(DiaperCategory::Normal),
            "diarrhea" => Some(DiaperCategory::Diarrhea),
            "constipation" => Some(DiaperCategory::Constipation),
            "unusual_color" => Some(DiaperCategory::UnusualColor),
            "blood_traces" => Some(DiaperCategory::BloodTraces),
            "mucus" => Some(DiaperCategory::Mucus),
            "no_stool" => Some(DiaperCategory::NoStool),
            "unclear" => Some(DiaperCategory::Unclear),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DiaperCategory::Normal => "normal",
            DiaperCategory::Diarrhea => "diarrhea",
            DiaperCategory::Constipation => "constipation",
            DiaperCategory::UnusualColor => "unusual_color",
            DiaperCategory::BloodTraces => "blood_traces",
            DiaperCategory::Mucus => "mucus",
            DiaperCategory::NoStool => "no_stool",
            DiaperCategory::Unclear => "unclear",
        }
    }

    fn is_sentinel(&self) -> bool {
        matches!(self, DiaperCategory::NoStool | DiaperCategory::Unclear)
    }

    fn indeterminate() -> Self {
        DiaperCategory::Unclear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_a_positive_detection() {
        assert!(!DiaperCategory::Normal.is_sentinel());
    }

    #[test]
    fn wire_names_roundtrip() {
        for category in [
            DiaperCategory::Normal,
            DiaperCategory::Diarrhea,
            DiaperCategory::Constipation,
            DiaperCategory::UnusualColor,
            DiaperCategory::BloodTraces,
            DiaperCategory::Mucus,
            DiaperCategory::NoStool,
            DiaperCategory::Unclear,
        ] {
            assert_eq!(DiaperCategory::parse(category.as_str()), Some(category));
        }
    }
}
