//! Cry classification categories
//!
//! Closed label set for the audio analyzer. `NoCry` and `Unclear` are the
//! sentinel "no signal" labels; everything else is a substantive detection.

use serde::{Deserialize, Serialize};

use crate::types::CategoryLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CryCategory {
    Hungry,
    Tired,
    Discomfort,
    Gas,
    Pain,
    /// No infant cry present in the clip
    NoCry,
    /// A cry is present but the reason cannot be determined
    Unclear,
}

impl CategoryLabel for CryCategory {
    fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "hungry" => Some(CryCategory::Hungry),
            "tired" => Some(CryCategory::Tired),
            "discomfort" => Some(CryCategory::Discomfort),
            "gas" => Some(CryCategory::Gas),
            "pain" => Some(CryCategory::Pain),
            "no_cry" => Some(CryCategory::NoCry),
            "unclear" => Some(CryCategory::Unclear),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CryCategory::Hungry => "hungry",
            CryCategory::Tired => "tired",
            CryCategory::Discomfort => "discomfort",
            CryCategory::Gas => "gas",
            CryCategory::Pain => "pain",
            CryCategory::NoCry => "no_cry",
            CryCategory::Unclear => "unclear",
        }
    }

    fn is_sentinel(&self) -> bool {
        matches!(self, CryCategory::NoCry | CryCategory::Unclear)
    }

    fn indeterminate() -> Self {
        CryCategory::Unclear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CryCategory::parse("HUNGRY"), Some(CryCategory::Hungry));
        assert_eq!(CryCategory::parse(" pain "), Some(CryCategory::Pain));
        assert_eq!(CryCategory::parse("screaming"), None);
    }

    #[test]
    fn exactly_two_sentinels() {
        let all = [
            CryCategory::Hungry,
            CryCategory::Tired,
            CryCategory::Discomfort,
            CryCategory::Gas,
            CryCategory::Pain,
            CryCategory::NoCry,
            CryCategory::Unclear,
        ];
        let sentinels: Vec<_> = all.iter().filter(|c| c.is_sentinel()).collect();
        assert_eq!(sentinels.len(), 2);
        assert!(CryCategory::indeterminate().is_sentinel());
    }

    #[test]
    fn wire_names_roundtrip() {
        for category in [
            CryCategory::Hungry,
            CryCategory::Tired,
            CryCategory::Discomfort,
            CryCategory::Gas,
            CryCategory::Pain,
            CryCategory::NoCry,
            CryCategory::Unclear,
        ] {
            assert_eq!(CryCategory::parse(category.as_str()), Some(category));
        }
    }
}
