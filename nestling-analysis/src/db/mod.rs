//! Database access for nestling-analysis
//!
//! **[SA-DB-010]** SQLite storage for accepted verdict records

pub mod records;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// **[SA-DB-010]** Opens (or creates) the analysis database
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize nestling-analysis specific tables
///
/// Creates the analysis_records table if it doesn't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analysis_records (
            record_id TEXT PRIMARY KEY,
            caller_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            category TEXT NOT NULL,
            confidence INTEGER NOT NULL,
            concern TEXT NOT NULL,
            explanation TEXT NOT NULL,
            recommendations TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (analysis_records)");

    Ok(())
}
