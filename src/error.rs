use thiserror::Error;

/// Message shown for any failure that is not the user's to fix.
pub const GENERIC_FAILURE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Application(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("A generation task is already being submitted")]
    Busy,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Auth error: {0}")]
    AuthError(String),
    #[error("Task {id} finished with status {status}")]
    TaskFailed { id: String, status: String },
}

impl PlaygroundError {
    /// Maps the error onto the transient notification the user sees.
    pub fn notice(&self) -> Notice {
        match self {
            PlaygroundError::Validation(msg) | PlaygroundError::Application(msg) => {
                Notice::warning(msg.clone())
            }
            PlaygroundError::Busy => Notice::warning(self.to_string()),
            _ => Notice::error(GENERIC_FAILURE),
        }
    }
}

impl From<reqwest::Error> for PlaygroundError {
    fn from(e: reqwest::Error) -> Self {
        PlaygroundError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for PlaygroundError {
    fn from(e: serde_json::Error) -> Self {
        PlaygroundError::ResponseError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A toast-style notification produced at the interaction boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
