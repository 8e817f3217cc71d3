//! Data models for nestling-analysis (Signal Analysis microservice)
//!
//! - **[SA-TYP-010]** Closed category enums with sentinel membership
//! - **[SA-WF-030]** Tagged pipeline outcome (rejection vs. verdict)
//! - **[SA-REC-020]** Persisted verdict record

pub mod cry;
pub mod diaper;
pub mod record;
pub mod verdict;

pub use cry::CryCategory;
pub use diaper::DiaperCategory;
pub use record::AnalysisRecord;
pub use verdict::{AdmissibilityVerdict, AnalysisOutcome, ClassificationVerdict};
