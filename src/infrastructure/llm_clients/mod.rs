pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use gemini::GeminiClient;
use std::sync::Arc;

#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
    async fn list_models(&self, config: &LLMConfig) -> Result<Vec<String>>;
}

/// The hosted agent client used outside of tests.
pub fn default_client() -> Arc<dyn LLMClient + Send + Sync> {
    Arc::new(GeminiClient::new())
}
