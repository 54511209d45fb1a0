use crate::error::{PlaygroundError, Result};
use crate::models::ModelInfo;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_GENERATE_PATH: &str = "/api/generate";
pub const DEFAULT_TASK_PATH: &str = "/api/task";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    pub base_url: String,
    pub generate_path: String,
    pub task_path: String,
    pub poll_interval: Duration,
    pub locale: String,
    pub token: Option<String>,
    pub request_timeout: Option<Duration>,
    /// Replaces the built-in model catalog when set.
    pub models: Option<Vec<ModelInfo>>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        PlaygroundConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            task_path: DEFAULT_TASK_PATH.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            locale: DEFAULT_LOCALE.to_string(),
            token: None,
            request_timeout: None,
            models: None,
        }
    }
}

impl PlaygroundConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("FLUX_BASE_URL").unwrap_or(defaults.base_url);
        let token = env::var("FLUX_API_TOKEN").ok().filter(|t| !t.is_empty());
        let locale = env::var("FLUX_LOCALE").unwrap_or(defaults.locale);
        let poll_interval = env::var("FLUX_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);
        let request_timeout = env::var("FLUX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        PlaygroundConfig {
            base_url,
            token,
            locale,
            poll_interval,
            request_timeout,
            ..defaults
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_endpoints(
        mut self,
        generate_path: impl Into<String>,
        task_path: impl Into<String>,
    ) -> Self {
        self.generate_path = generate_path.into();
        self.task_path = task_path.into();
        self
    }

    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = Some(models);
        self
    }

    pub fn generate_url(&self) -> String {
        join_url(&self.base_url, &self.generate_path)
    }

    pub fn task_url(&self) -> String {
        join_url(&self.base_url, &self.task_path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(PlaygroundError::ConfigError("base URL is required".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(PlaygroundError::ConfigError(
                "poll interval must be greater than zero".into(),
            ));
        }
        if matches!(&self.models, Some(models) if models.is_empty()) {
            return Err(PlaygroundError::ConfigError(
                "model catalog override is empty".into(),
            ));
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
