//! Client side of an asynchronous image-generation playground.
//!
//! A [`Playground`] holds the form selection, submits one generation task
//! through [`TaskSubmitter`], follows it with [`TaskPoller`] every two seconds
//! while it is processing, and derives a [`ViewState`] from what it has seen.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod playground;
pub mod transport;

pub use auth::{CredentialProvider, EnvToken, StaticToken};
pub use client::{next_interval, PlaygroundClient, TaskPoller, TaskStream, TaskSubmitter};
pub use config::PlaygroundConfig;
pub use error::{Notice, NoticeLevel, PlaygroundError, Result};
pub use models::{
    AspectRatio, GenerateRequest, GenerateResponse, ModelInfo, ModelType, Task, TaskEnvelope,
    TaskStatus,
};
pub use playground::{FormSelection, Playground, QueryState, ViewState};
pub use transport::{HttpTaskApi, TaskApi};
