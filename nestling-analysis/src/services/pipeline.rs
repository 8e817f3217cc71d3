//! Shared two-stage analysis workflow
//!
//! **[SA-WF-010]** Screening → extraction → decision policy → persistence
//! gate, identical for both analyzers. Stages run strictly sequentially for
//! one sample; the only suspension points are the two chain invocations (plus
//! fallback attempts inside them). Nothing is shared mutably across requests.
//!
//! Outcome contract **[SA-WF-030]**: an inadmissible sample returns
//! `AnalysisOutcome::Rejected` (a success), a fatal provider failure returns
//! `Err(InferenceError)`, and everything else returns a verdict — possibly a
//! negative or downgraded one. Malformed model output is never an error.

use std::sync::Arc;

use crate::models::{AnalysisOutcome, ClassificationVerdict};
use crate::services::decision_policy;
use crate::services::model_chain::ModelChain;
use crate::services::recorder::VerdictRecorder;
use crate::services::screening;
use crate::services::verdict_parser;
use crate::types::{AnalysisDomain, CategoryLabel, InferenceError, InferenceProvider, InferenceRequest, MediaSample};

pub struct AnalysisPipeline<D: AnalysisDomain> {
    domain: D,
    provider: Arc<dyn InferenceProvider>,
    screening_chain: ModelChain,
    extraction_chain: ModelChain,
    recorder: VerdictRecorder,
}

impl<D: AnalysisDomain> AnalysisPipeline<D> {
    pub fn new(
        domain: D,
        provider: Arc<dyn InferenceProvider>,
        screening_chain: ModelChain,
        extraction_chain: ModelChain,
        recorder: VerdictRecorder,
    ) -> Self {
        Self {
            domain,
            provider,
            screening_chain,
            extraction_chain,
            recorder,
        }
    }

    /// Run one sample through the full workflow
    pub async fn analyze(
        &self,
        caller_id: &str,
        sample: &MediaSample,
    ) -> Result<AnalysisOutcome<D::Category>, InferenceError> {
        let kind = self.domain.kind();

        // Stage 1: admissibility screening
        let request = InferenceRequest {
            prompt: self.domain.screening_prompt(),
            mime_type: &sample.mime_type,
            media: &sample.payload,
        };
        let outcome = self
            .screening_chain
            .invoke(self.provider.as_ref(), &request)
            .await?;
        let admissibility = screening::interpret_screening(&self.domain, &outcome.text);

        tracing::info!(
            caller_id = %caller_id,
            kind = %kind,
            admissible = admissibility.admissible,
            subject_label = %admissibility.subject_label,
            screen_confidence = admissibility.confidence,
            variant = %outcome.variant,
            attempts = outcome.attempts,
            "Screening complete"
        );

        if !admissibility.admissible {
            let message = admissibility
                .rejection_message
                .unwrap_or_else(|| self.domain.could_not_verify_message().to_string());
            return Ok(AnalysisOutcome::Rejected { message });
        }

        // Stage 2: structured extraction
        let request = InferenceRequest {
            prompt: self.domain.extraction_prompt(),
            mime_type: &sample.mime_type,
            media: &sample.payload,
        };
        let outcome = self
            .extraction_chain
            .invoke(self.provider.as_ref(), &request)
            .await?;

        let verdict = match verdict_parser::parse_verdict::<D::Category>(&outcome.text) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    caller_id = %caller_id,
                    kind = %kind,
                    variant = %outcome.variant,
                    "Extraction output had no parseable verdict; using conservative default"
                );
                ClassificationVerdict::inconclusive(
                    self.domain.inconclusive_explanation(),
                    self.domain.inconclusive_recommendations(),
                )
            }
        };

        // Post-processing: confidence floor, then the persistence gate
        let verdict = decision_policy::apply(
            verdict,
            self.domain.inconclusive_explanation(),
            self.domain.inconclusive_recommendations(),
        );

        self.recorder.maybe_record(caller_id, kind, &verdict).await;

        tracing::info!(
            caller_id = %caller_id,
            kind = %kind,
            category = verdict.category.as_str(),
            confidence = verdict.confidence,
            is_positive = verdict.is_positive,
            "Analysis complete"
        );

        Ok(AnalysisOutcome::Verdict(verdict))
    }
}
