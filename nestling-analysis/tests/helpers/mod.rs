//! Shared test helpers: scripted inference provider and media fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use nestling_analysis::types::{InferenceError, InferenceProvider, InferenceRequest};
use nestling_analysis::services::ModelChain;
use nestling_analysis::{AnalysisSettings, AppState};

/// One recorded provider call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub variant: String,
    pub prompt: String,
}

/// Provider that replays a fixed script and records every call
pub struct FakeProvider {
    script: Mutex<VecDeque<Result<String, InferenceError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeProvider {
    pub fn new(script: Vec<Result<String, InferenceError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn variants_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.variant).collect()
    }
}

#[async_trait]
impl InferenceProvider for FakeProvider {
    async fn generate(
        &self,
        variant: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(RecordedCall {
            variant: variant.to_string(),
            prompt: request.prompt.to_string(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted provider ran out of responses")
    }
}

/// Three-variant chain used by every test
pub fn test_chain() -> ModelChain {
    ModelChain::new(vec![
        "primary".to_string(),
        "secondary".to_string(),
        "tertiary".to_string(),
    ])
    .unwrap()
}

/// Fresh SQLite database in a temp dir
pub async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = nestling_analysis::db::init_database_pool(&dir.path().join("test.db"))
        .await
        .unwrap();
    (pool, dir)
}

/// Full application state over a scripted provider
pub async fn test_state(
    script: Vec<Result<String, InferenceError>>,
) -> (AppState, Arc<FakeProvider>, SqlitePool, TempDir) {
    let (pool, dir) = test_pool().await;
    let provider = FakeProvider::new(script);

    let settings = AnalysisSettings {
        min_clip_seconds: 3.0,
        screening_chain: test_chain(),
        extraction_chain: test_chain(),
    };

    let state = AppState::new(pool.clone(), provider.clone(), settings);
    (state, provider, pool, dir)
}

/// Minimal RIFF/WAVE payload
pub fn wav_bytes() -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(b"RIFF");
    v.extend_from_slice(&36u32.to_le_bytes());
    v.extend_from_slice(b"WAVE");
    v.extend_from_slice(b"fmt ");
    v.extend_from_slice(&16u32.to_le_bytes());
    v.extend_from_slice(&1u16.to_le_bytes());
    v.extend_from_slice(&1u16.to_le_bytes());
    v.extend_from_slice(&16_000u32.to_le_bytes());
    v.extend_from_slice(&32_000u32.to_le_bytes());
    v.extend_from_slice(&2u16.to_le_bytes());
    v.extend_from_slice(&16u16.to_le_bytes());
    v.extend_from_slice(b"data");
    v.extend_from_slice(&64u32.to_le_bytes());
    v.extend_from_slice(&[0u8; 64]);
    v
}

/// Minimal JPEG payload
pub fn jpeg_bytes() -> Vec<u8> {
    let mut v = vec![0xFF, 0xD8, 0xFF, 0xE0];
    v.extend_from_slice(&[0u8; 32]);
    v
}

pub fn wav_base64() -> String {
    STANDARD.encode(wav_bytes())
}

pub fn jpeg_base64() -> String {
    STANDARD.encode(jpeg_bytes())
}

/// Extraction reply with the given category/confidence
pub fn extraction_json(category: &str, confidence: u8) -> String {
    format!(
        r#"{{"category": "{}", "confidence": {}, "explanation": "test evidence", "recommendations": ["first suggestion"], "concern": "low"}}"#,
        category, confidence
    )
}
