use crate::error::{PlaygroundError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub model: String,
    pub input_prompt: String,
    pub aspect_ratio: String,
    /// 0 when public, 1 when private.
    pub is_private: u8,
    pub locale: String,
}

/// Body of the generate endpoint: `{"id": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn into_task_id(self) -> Result<String> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Err(PlaygroundError::Application(error));
        }
        match self.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(PlaygroundError::ResponseError(
                "generate response carried neither id nor error".into(),
            )),
        }
    }
}
