//! Analyze endpoint handlers
//!
//! **[SA-API-010]** POST /analyze/cry, POST /analyze/diaper
//!
//! Caller identity arrives as the opaque `X-Caller-Id` header placed by the
//! upstream auth layer; requests without it never reach the pipeline. Ingress
//! rejections and inadmissible samples come back as `accepted: false` with a
//! fixed reason; fatal provider failures come back as 503.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{AnalysisOutcome, ClassificationVerdict, CryCategory, DiaperCategory};
use crate::services::{
    AnalysisPipeline, CryDomain, DiaperDomain, MediaIngress, VerdictRecorder,
};
use crate::types::MediaKind;
use crate::AppState;

/// Header carrying the authenticated caller identity
pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// POST /analyze/{cry,diaper} request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub media_base64: String,
    /// Clip length in seconds; audio submissions only
    #[serde(default)]
    pub duration_seconds: Option<f32>,
}

/// POST /analyze/{cry,diaper} response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse<C> {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ClassificationVerdict<C>>,
}

impl<C> AnalyzeResponse<C> {
    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            rejection_reason: Some(reason.into()),
            verdict: None,
        }
    }

    fn from_outcome(outcome: AnalysisOutcome<C>) -> Self {
        match outcome {
            AnalysisOutcome::Rejected { message } => Self::rejected(message),
            AnalysisOutcome::Verdict(verdict) => Self {
                accepted: true,
                rejection_reason: None,
                verdict: Some(verdict),
            },
        }
    }
}

/// Extract the authenticated caller identity
fn caller_identity(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(CALLER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("missing caller identity".to_string()))
}

/// POST /analyze/cry
pub async fn analyze_cry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse<CryCategory>>> {
    let caller_id = caller_identity(&headers)?;

    let ingress = MediaIngress::new(state.settings.min_clip_seconds);
    let sample = match ingress.prepare(
        MediaKind::Cry,
        &request.media_base64,
        request.duration_seconds,
    ) {
        Ok(sample) => sample,
        Err(rejection) => return Ok(Json(AnalyzeResponse::rejected(rejection.message))),
    };

    let pipeline = AnalysisPipeline::new(
        CryDomain,
        state.provider.clone(),
        state.settings.screening_chain.clone(),
        state.settings.extraction_chain.clone(),
        VerdictRecorder::new(state.db.clone()),
    );

    let outcome = pipeline.analyze(&caller_id, &sample).await.map_err(|e| {
        tracing::error!(caller_id = %caller_id, error = %e, "Cry analysis pipeline failed");
        ApiError::Unavailable("cry analysis is temporarily unavailable".to_string())
    })?;

    Ok(Json(AnalyzeResponse::from_outcome(outcome)))
}

/// POST /analyze/diaper
pub async fn analyze_diaper(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse<DiaperCategory>>> {
    let caller_id = caller_identity(&headers)?;

    let ingress = MediaIngress::new(state.settings.min_clip_seconds);
    let sample = match ingress.prepare(MediaKind::Diaper, &request.media_base64, None) {
        Ok(sample) => sample,
        Err(rejection) => return Ok(Json(AnalyzeResponse::rejected(rejection.message))),
    };

    let pipeline = AnalysisPipeline::new(
        DiaperDomain,
        state.provider.clone(),
        state.settings.screening_chain.clone(),
        state.settings.extraction_chain.clone(),
        VerdictRecorder::new(state.db.clone()),
    );

    let outcome = pipeline.analyze(&caller_id, &sample).await.map_err(|e| {
        tracing::error!(caller_id = %caller_id, error = %e, "Diaper analysis pipeline failed");
        ApiError::Unavailable("diaper analysis is temporarily unavailable".to_string())
    })?;

    Ok(Json(AnalyzeResponse::from_outcome(outcome)))
}

/// Build analyze routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze/cry", post(analyze_cry))
        .route("/analyze/diaper", post(analyze_diaper))
}
