use crate::{
    error::{PlaygroundError, Result},
    models::{AspectRatio, GenerateRequest, ModelInfo},
};

pub const EMPTY_PROMPT_WARNING: &str = "Please enter a prompt";

/// What the user has picked in the playground form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSelection {
    pub model: ModelInfo,
    pub aspect_ratio: AspectRatio,
    pub prompt: String,
    pub is_public: bool,
}

impl FormSelection {
    pub fn new(model: ModelInfo) -> Self {
        Self {
            model,
            aspect_ratio: AspectRatio::default(),
            prompt: String::new(),
            is_public: true,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn has_prompt(&self) -> bool {
        !self.prompt.is_empty()
    }

    pub fn to_request(&self, locale: &str) -> Result<GenerateRequest> {
        if !self.has_prompt() {
            return Err(PlaygroundError::Validation(EMPTY_PROMPT_WARNING.into()));
        }

        Ok(GenerateRequest {
            model: self.model.id.clone(),
            input_prompt: self.prompt.clone(),
            aspect_ratio: self.aspect_ratio.as_str().to_string(),
            is_private: if self.is_public { 0 } else { 1 },
            locale: locale.to_string(),
        })
    }
}
