use crate::{
    error::Result,
    models::{GenerateRequest, GenerateResponse, TaskEnvelope},
};
use async_trait::async_trait;

/// The two backend calls the playground makes.
///
/// Both return `PlaygroundError::Transport` for non-OK statuses and network
/// failures. An application-level `{"error": ...}` body is a successful
/// call as far as the transport is concerned.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn create_task(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
    async fn query_task(&self, flux_id: &str) -> Result<TaskEnvelope>;
}
