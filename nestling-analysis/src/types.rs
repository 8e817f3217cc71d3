//! Core Types and Trait Definitions for the Signal Analysis pipeline
//!
//! Defines the seams the two-stage classify-then-decide workflow is built on:
//! - **[SA-INF-010]** `InferenceProvider`: one call against one named model variant
//! - **[SA-TYP-010]** `CategoryLabel`: closed per-domain category sets with sentinel membership
//! - **[SA-TYP-020]** `AnalysisDomain`: domain plug-in (prompts, label tables, fixed guidance)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Common Types
// ============================================================================

/// Media domain handled by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Infant cry audio clip
    Cry,
    /// Diaper photo
    Diaper,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Cry => "cry",
            MediaKind::Diaper => "diaper",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cry" => Some(MediaKind::Cry),
            "diaper" => Some(MediaKind::Diaper),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency-or-concern tier attached to every verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernLevel {
    Low,
    Moderate,
    High,
}

impl ConcernLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernLevel::Low => "low",
            ConcernLevel::Moderate => "moderate",
            ConcernLevel::High => "high",
        }
    }

    /// Lenient parse for model-supplied tier names
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "none" | "routine" => Some(ConcernLevel::Low),
            "moderate" | "medium" => Some(ConcernLevel::Moderate),
            "high" | "urgent" => Some(ConcernLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for ConcernLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded media payload ready for inference
///
/// Owned by the request that created it; discarded after the pipeline returns.
#[derive(Debug, Clone)]
pub struct MediaSample {
    /// Decoded media bytes
    pub payload: Vec<u8>,
    /// Content type sent to the provider
    pub mime_type: String,
    /// Clip length in seconds (audio only)
    pub duration_seconds: Option<f32>,
}

// ============================================================================
// Inference Provider Seam
// ============================================================================

/// One structured-prompt inference request
#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    /// Prompt text (screening or extraction template)
    pub prompt: &'a str,
    /// Media content type
    pub mime_type: &'a str,
    /// Raw media bytes (the client handles transport encoding)
    pub media: &'a [u8],
}

/// Typed inference failures
///
/// **[SA-INF-030]** Retryable failures advance the fallback chain to the next
/// model variant; fatal failures stop it immediately.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    #[error("provider rate limited the request")]
    RateLimited,

    #[error("provider server error (HTTP {0})")]
    ServerError(u16),

    #[error("provider request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider rejected credentials (HTTP {0})")]
    AuthRejected(u16),

    #[error("provider rejected request shape (HTTP {status}): {detail}")]
    BadRequest { status: u16, detail: String },

    #[error("provider returned no usable completion")]
    EmptyCompletion,

    #[error("all {attempts} configured model variants failed")]
    Exhausted { attempts: usize },
}

impl InferenceError {
    /// Whether another model variant is worth trying
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InferenceError::RateLimited
                | InferenceError::ServerError(_)
                | InferenceError::Timeout
                | InferenceError::Network(_)
                | InferenceError::EmptyCompletion
        )
    }
}

/// Inference provider boundary
///
/// Implemented by the HTTP client in production and by scripted fakes in
/// tests. One call targets exactly one named model variant and returns the
/// raw text output or a typed failure.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn generate(
        &self,
        variant: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<String, InferenceError>;
}

// ============================================================================
// Domain Plug-in Traits
// ============================================================================

/// Closed classification label set for one domain
///
/// Each domain has substantive labels plus two sentinel "no signal" labels.
/// A verdict is a positive detection exactly when its category is not a
/// sentinel.
pub trait CategoryLabel: Copy + Eq + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Parse a model-supplied label (case-insensitive); `None` if unknown
    fn parse(label: &str) -> Option<Self>
    where
        Self: Sized;

    /// Canonical wire name
    fn as_str(&self) -> &'static str;

    /// Whether this label means "no real signal detected"
    fn is_sentinel(&self) -> bool;

    /// Sentinel used for policy downgrades and conservative defaults
    fn indeterminate() -> Self
    where
        Self: Sized;
}

/// One entry of a domain's closed screening label set
///
/// `rejection` is `None` for the single admissible label, otherwise the
/// fixed, pre-written user-facing message for that rejection category.
/// Messages come from this table, never from model prose, so wording is
/// stable across model variants.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningLabel {
    pub label: &'static str,
    pub rejection: Option<&'static str>,
}

/// Domain plug-in for the shared two-stage pipeline
///
/// **[SA-TYP-020]** The cry and diaper analyzers implement this; everything
/// else (fallback chain, screening interpretation, verdict parsing, decision
/// policy, persistence gate) is shared machinery.
pub trait AnalysisDomain: Send + Sync {
    type Category: CategoryLabel;

    fn kind(&self) -> MediaKind;

    /// Closed-label subject-classification prompt
    fn screening_prompt(&self) -> &'static str;

    /// Structured-output classification prompt
    fn extraction_prompt(&self) -> &'static str;

    /// Closed screening label set with fixed rejection messages
    fn screening_labels(&self) -> &'static [ScreeningLabel];

    /// Fail-closed message when the screening reply matches no known label
    fn could_not_verify_message(&self) -> &'static str;

    /// Fixed explanation used for downgraded and unparseable verdicts
    fn inconclusive_explanation(&self) -> &'static str;

    /// Fixed recommendations used for downgraded and unparseable verdicts
    fn inconclusive_recommendations(&self) -> &'static [&'static str];
}
