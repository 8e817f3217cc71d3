//! Persisted verdict record
//!
//! **[SA-REC-020]** One row per accepted positive verdict. Created only by
//! the persistence gate; this service never updates or deletes rows (history
//! lifecycle is owned by the companion app's store).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::ClassificationVerdict;
use crate::types::{CategoryLabel, ConcernLevel, MediaKind};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    pub record_id: Uuid,
    /// Opaque authenticated identity from the upstream auth layer
    pub caller_id: String,
    pub kind: MediaKind,
    pub category: String,
    pub confidence: u8,
    pub concern: ConcernLevel,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Build a record from a post-policy verdict
    pub fn from_verdict<C: CategoryLabel>(
        caller_id: &str,
        kind: MediaKind,
        verdict: &ClassificationVerdict<C>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            caller_id: caller_id.to_string(),
            kind,
            category: verdict.category.as_str().to_string(),
            confidence: verdict.confidence,
            concern: verdict.concern,
            explanation: verdict.explanation.clone(),
            recommendations: verdict.recommendations.clone(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CryCategory;

    #[test]
    fn record_copies_verdict_fields() {
        let verdict = ClassificationVerdict::from_parts(
            CryCategory::Gas,
            71,
            "short grunting cries".to_string(),
            vec!["Try burping".to_string()],
            ConcernLevel::Low,
        );
        let record = AnalysisRecord::from_verdict("caller-1", MediaKind::Cry, &verdict);

        assert_eq!(record.caller_id, "caller-1");
        assert_eq!(record.kind, MediaKind::Cry);
        assert_eq!(record.category, "gas");
        assert_eq!(record.confidence, 71);
        assert_eq!(record.recommendations.len(), 1);
    }
}
