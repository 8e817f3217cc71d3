//! Analysis record database operations
//!
//! **[SA-REC-020]** Insert-only access to accepted verdict rows. The history
//! screens of the companion app read these; nothing in this service updates
//! or deletes them.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use nestling_common::{Error, Result};

use crate::models::AnalysisRecord;
use crate::types::{ConcernLevel, MediaKind};

/// Insert one accepted verdict record
pub async fn insert_record(pool: &SqlitePool, record: &AnalysisRecord) -> Result<()> {
    let recommendations = serde_json::to_string(&record.recommendations)
        .map_err(|e| Error::Internal(format!("Failed to serialize recommendations: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO analysis_records (
            record_id, caller_id, kind, category,
            confidence, concern, explanation, recommendations, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.record_id.to_string())
    .bind(&record.caller_id)
    .bind(record.kind.as_str())
    .bind(&record.category)
    .bind(record.confidence as i64)
    .bind(record.concern.as_str())
    .bind(&record.explanation)
    .bind(&recommendations)
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Count records for one caller
pub async fn count_records_for_caller(pool: &SqlitePool, caller_id: &str) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM analysis_records WHERE caller_id = ?")
            .bind(caller_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Most recent records for one caller, newest first
pub async fn recent_records_for_caller(
    pool: &SqlitePool,
    caller_id: &str,
    limit: u32,
) -> Result<Vec<AnalysisRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT record_id, caller_id, kind, category,
               confidence, concern, explanation, recommendations, created_at
        FROM analysis_records
        WHERE caller_id = ?
        ORDER BY created_at DESC
        LIMIT ?
        "#,
    )
    .bind(caller_id)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(row_to_record).collect()
}

fn row_to_record(row: sqlx::sqlite::SqliteRow) -> Result<AnalysisRecord> {
    let record_id: String = row.get("record_id");
    let kind: String = row.get("kind");
    let concern: String = row.get("concern");
    let recommendations: String = row.get("recommendations");
    let created_at: String = row.get("created_at");
    let confidence: i64 = row.get("confidence");

    Ok(AnalysisRecord {
        record_id: Uuid::parse_str(&record_id)
            .map_err(|e| Error::Internal(format!("Bad record_id: {}", e)))?,
        caller_id: row.get("caller_id"),
        kind: MediaKind::parse(&kind)
            .ok_or_else(|| Error::Internal(format!("Unknown record kind: {}", kind)))?,
        category: row.get("category"),
        confidence: confidence.clamp(0, 100) as u8,
        concern: ConcernLevel::parse(&concern)
            .ok_or_else(|| Error::Internal(format!("Unknown concern level: {}", concern)))?,
        explanation: row.get("explanation"),
        recommendations: serde_json::from_str(&recommendations)
            .map_err(|e| Error::Internal(format!("Bad recommendations JSON: {}", e)))?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| Error::Internal(format!("Bad created_at: {}", e)))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationVerdict, CryCategory};

    async fn test_pool() -> (SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::init_database_pool(&dir.path().join("test.db"))
            .await
            .unwrap();
        (pool, dir)
    }

    fn sample_record(caller_id: &str) -> AnalysisRecord {
        let verdict = ClassificationVerdict::from_parts(
            CryCategory::Hungry,
            82,
            "rhythmic cry".to_string(),
            vec!["Offer a feed".to_string()],
            ConcernLevel::Low,
        );
        AnalysisRecord::from_verdict(caller_id, MediaKind::Cry, &verdict)
    }

    #[tokio::test]
    async fn insert_and_count_roundtrip() {
        let (pool, _dir) = test_pool().await;

        assert_eq!(count_records_for_caller(&pool, "caller-1").await.unwrap(), 0);

        insert_record(&pool, &sample_record("caller-1")).await.unwrap();
        insert_record(&pool, &sample_record("caller-1")).await.unwrap();
        insert_record(&pool, &sample_record("caller-2")).await.unwrap();

        assert_eq!(count_records_for_caller(&pool, "caller-1").await.unwrap(), 2);
        assert_eq!(count_records_for_caller(&pool, "caller-2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_preserves_fields() {
        let (pool, _dir) = test_pool().await;

        let record = sample_record("caller-1");
        insert_record(&pool, &record).await.unwrap();

        let fetched = recent_records_for_caller(&pool, "caller-1", 10).await.unwrap();
        assert_eq!(fetched.len(), 1);

        let fetched = &fetched[0];
        assert_eq!(fetched.record_id, record.record_id);
        assert_eq!(fetched.kind, MediaKind::Cry);
        assert_eq!(fetched.category, "hungry");
        assert_eq!(fetched.confidence, 82);
        assert_eq!(fetched.concern, ConcernLevel::Low);
        assert_eq!(fetched.recommendations, vec!["Offer a feed"]);
    }
}
