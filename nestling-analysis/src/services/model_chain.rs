//! Model variant fallback chain
//!
//! **[SA-INF-020]** Owns the ordered list of model variants for one prompt
//! kind and walks it until a variant succeeds. Retryable failures advance to
//! the next variant; fatal failures stop immediately (a malformed request or
//! rejected credentials will not become valid on another variant). Exhausting
//! the list with only retryable failures yields a synthetic fatal failure.
//!
//! The variant list is injected at construction, never read from ambient
//! state, so tests can run the chain against scripted providers.

use nestling_common::Error;

use crate::types::{InferenceError, InferenceProvider, InferenceRequest};

/// Ordered fallback chain over model variants
///
/// Read-only configuration shared across requests; one `invoke` holds no
/// state between calls and runs its attempts strictly sequentially.
#[derive(Debug, Clone)]
pub struct ModelChain {
    variants: Vec<String>,
}

/// Successful chain invocation
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// Raw text output from the winning variant
    pub text: String,
    /// The variant that produced it
    pub variant: String,
    /// Total calls issued, including failed attempts
    pub attempts: usize,
}

impl ModelChain {
    /// Build a chain; the variant list must be non-empty
    pub fn new(variants: Vec<String>) -> Result<Self, Error> {
        if variants.is_empty() {
            return Err(Error::InvalidInput(
                "model chain requires at least one variant".to_string(),
            ));
        }
        Ok(Self { variants })
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Walk the chain until one variant succeeds
    ///
    /// **[SA-INF-020]** `Trying(i)` advances to `Trying(i+1)` only on a
    /// retryable failure; success and fatal failures are terminal, as is
    /// exhaustion of the list.
    pub async fn invoke(
        &self,
        provider: &dyn InferenceProvider,
        request: &InferenceRequest<'_>,
    ) -> Result<ChainOutcome, InferenceError> {
        let mut attempts = 0;

        for variant in &self.variants {
            attempts += 1;
            tracing::debug!(variant = %variant, attempt = attempts, "Trying model variant");

            match provider.generate(variant, request).await {
                Ok(text) => {
                    if attempts > 1 {
                        tracing::info!(
                            variant = %variant,
                            attempts = attempts,
                            "Model variant succeeded after fallback"
                        );
                    }
                    return Ok(ChainOutcome {
                        text,
                        variant: variant.clone(),
                        attempts,
                    });
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        variant = %variant,
                        error = %e,
                        "Model variant failed, advancing to next"
                    );
                }
                Err(e) => {
                    tracing::error!(variant = %variant, error = %e, "Fatal provider failure");
                    return Err(e);
                }
            }
        }

        tracing::error!(attempts = attempts, "All model variants exhausted");
        Err(InferenceError::Exhausted { attempts })
    }
}
