//! Verdict persistence gate
//!
//! **[SA-REC-010]** Writes an accepted verdict to storage if and only if the
//! post-policy verdict is a positive detection. Rejected samples and
//! negative/downgraded verdicts leave no trace. The write is attempted at
//! most once; a failed insert is logged and swallowed so the caller still
//! receives the verdict (a retry loop here would risk duplicate history rows).

use sqlx::SqlitePool;

use crate::db;
use crate::models::{AnalysisRecord, ClassificationVerdict};
use crate::types::{CategoryLabel, MediaKind};

pub struct VerdictRecorder {
    pool: SqlitePool,
}

impl VerdictRecorder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a verdict when the gate allows it; returns whether a row was written
    pub async fn maybe_record<C: CategoryLabel>(
        &self,
        caller_id: &str,
        kind: MediaKind,
        verdict: &ClassificationVerdict<C>,
    ) -> bool {
        if !verdict.is_positive {
            tracing::debug!(
                kind = %kind,
                category = verdict.category.as_str(),
                "Skipping persistence for non-positive verdict"
            );
            return false;
        }

        let record = AnalysisRecord::from_verdict(caller_id, kind, verdict);

        match db::records::insert_record(&self.pool, &record).await {
            Ok(()) => {
                tracing::info!(
                    record_id = %record.record_id,
                    kind = %kind,
                    category = %record.category,
                    confidence = record.confidence,
                    "Verdict recorded"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    kind = %kind,
                    error = %e,
                    "Failed to record verdict; returning it to the caller anyway"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::records::count_records_for_caller;
    use crate::models::CryCategory;
    use crate::types::ConcernLevel;

    async fn recorder() -> (VerdictRecorder, SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::init_database_pool(&dir.path().join("test.db"))
            .await
            .unwrap();
        (VerdictRecorder::new(pool.clone()), pool, dir)
    }

    fn verdict(category: CryCategory, confidence: u8) -> ClassificationVerdict<CryCategory> {
        ClassificationVerdict::from_parts(
            category,
            confidence,
            "explanation".to_string(),
            vec![],
            ConcernLevel::Low,
        )
    }

    #[tokio::test]
    async fn positive_verdict_is_recorded_once() {
        let (recorder, pool, _dir) = recorder().await;

        let written = recorder
            .maybe_record("caller-1", MediaKind::Cry, &verdict(CryCategory::Hungry, 82))
            .await;

        assert!(written);
        assert_eq!(count_records_for_caller(&pool, "caller-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sentinel_verdict_is_not_recorded() {
        let (recorder, pool, _dir) = recorder().await;

        let written = recorder
            .maybe_record("caller-1", MediaKind::Cry, &verdict(CryCategory::Unclear, 90))
            .await;

        assert!(!written);
        assert_eq!(count_records_for_caller(&pool, "caller-1").await.unwrap(), 0);
    }
}
