use crate::error::{PlaygroundError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub model_type: ModelType,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Schnell,
    Dev,
    Pro,
}

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::Schnell, ModelType::Dev, ModelType::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Schnell => "schnell",
            ModelType::Dev => "dev",
            ModelType::Pro => "pro",
        }
    }
}

impl ModelInfo {
    fn builtin(id: &str, name: &str, model_type: ModelType, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            model_type,
            description: description.to_string(),
        }
    }
}

/// The selectable models, in display order. The first entry is the default.
pub fn default_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::builtin(
            "black-forest-labs/flux-schnell",
            "FLUX.1 [schnell]",
            ModelType::Schnell,
            "Fastest model, tailored for local development and personal use.",
        ),
        ModelInfo::builtin(
            "black-forest-labs/flux-dev",
            "FLUX.1 [dev]",
            ModelType::Dev,
            "Open-weight guidance-distilled model for non-commercial use.",
        ),
        ModelInfo::builtin(
            "black-forest-labs/flux-pro",
            "FLUX.1 [pro]",
            ModelType::Pro,
            "State-of-the-art prompt following and output diversity.",
        ),
    ]
}

pub fn find_model<'a>(models: &'a [ModelInfo], id: &str) -> Result<&'a ModelInfo> {
    models
        .iter()
        .find(|m| m.id == id || m.name.eq_ignore_ascii_case(id))
        .ok_or_else(|| PlaygroundError::ConfigError(format!("Unknown model: {}", id)))
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "3:2")]
    Landscape,
    #[serde(rename = "2:3")]
    Tall,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Widescreen,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Tall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "3:2",
            AspectRatio::Tall => "2:3",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                PlaygroundError::Validation(format!("Unsupported aspect ratio: {}", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_first() {
        let models = default_models();
        assert_eq!(models[0].model_type, ModelType::Schnell);
        assert_eq!(models.len(), ModelType::ALL.len());
    }

    #[test]
    fn test_find_model_by_id_or_name() {
        let models = default_models();
        assert_eq!(
            find_model(&models, "black-forest-labs/flux-dev").unwrap().model_type,
            ModelType::Dev
        );
        assert_eq!(
            find_model(&models, "flux.1 [pro]").unwrap().model_type,
            ModelType::Pro
        );
        assert!(find_model(&models, "m404").is_err());
    }

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Widescreen);
        assert_eq!(AspectRatio::default().as_str(), "1:1");
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(
            serde_json::to_string(&AspectRatio::Portrait).unwrap(),
            "\"9:16\""
        );
    }
}
