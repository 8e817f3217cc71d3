//! Service modules for the signal analysis workflow
//!
//! **[SA-COMP-010]** Component implementations: provider client, fallback
//! chain, the two pipeline stages, decision policy, and the persistence gate.

pub mod cry_analyzer;
pub mod decision_policy;
pub mod diaper_analyzer;
pub mod inference_client;
pub mod media_ingress;
pub mod model_chain;
pub mod pipeline;
pub mod recorder;
pub mod screening;
pub mod verdict_parser;

pub use cry_analyzer::CryDomain;
pub use diaper_analyzer::DiaperDomain;
pub use inference_client::InferenceClient;
pub use media_ingress::{IngressRejection, MediaIngress};
pub use model_chain::{ChainOutcome, ModelChain};
pub use pipeline::AnalysisPipeline;
pub use recorder::VerdictRecorder;
