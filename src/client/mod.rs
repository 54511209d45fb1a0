pub mod poller;
pub mod submitter;

use crate::{
    auth::{CredentialProvider, EnvToken, StaticToken},
    config::PlaygroundConfig,
    error::Result,
    models::{default_models, ModelInfo, Task},
    playground::{form::FormSelection, Playground},
    transport::{HttpTaskApi, TaskApi},
};
use std::sync::Arc;

pub use poller::{next_interval, TaskPoller, TaskStream};
pub use submitter::TaskSubmitter;

/// Entry point bundling the submitter and poller over one backend.
#[derive(Clone)]
pub struct PlaygroundClient {
    submitter: TaskSubmitter,
    poller: TaskPoller,
    locale: String,
    models: Vec<ModelInfo>,
}

impl PlaygroundClient {
    /// HTTP client for `config`. Uses the configured token, or falls back to
    /// reading `FLUX_API_TOKEN` on every request.
    pub fn new(config: PlaygroundConfig) -> Result<Self> {
        let credentials: Arc<dyn CredentialProvider> = match &config.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(EnvToken::default()),
        };
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: PlaygroundConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let api = Arc::new(HttpTaskApi::new(&config, credentials)?);
        Ok(Self::with_api(config, api))
    }

    pub fn with_api(config: PlaygroundConfig, api: Arc<dyn TaskApi>) -> Self {
        Self {
            submitter: TaskSubmitter::new(api.clone()),
            poller: TaskPoller::with_interval(api, config.poll_interval),
            locale: config.locale,
            models: config.models.unwrap_or_else(default_models),
        }
    }

    pub fn submitter(&self) -> &TaskSubmitter {
        &self.submitter
    }

    pub fn poller(&self) -> &TaskPoller {
        &self.poller
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// A fresh playground session with the default form selection.
    pub fn playground(&self) -> Playground {
        Playground::new(self.clone())
    }

    pub fn default_form(&self) -> FormSelection {
        let model = self
            .models
            .first()
            .cloned()
            .unwrap_or_else(|| default_models().remove(0));
        FormSelection::new(model)
    }

    /// Submit and wait for the task to settle.
    pub async fn generate(&self, form: &FormSelection) -> Result<Task> {
        let flux_id = self.submitter.submit(form, &self.locale).await?;
        self.poller.wait(&flux_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::{succeeded, FakeTaskApi};
    use crate::models::{ModelType, TaskStatus};

    #[tokio::test(start_paused = true)]
    async fn test_generate_end_to_end() {
        let api = Arc::new(
            FakeTaskApi::new()
                .with_created("t1")
                .with_task(Task::processing("t1"))
                .with_task(succeeded("t1", "https://x/y.png", "1:1")),
        );
        let client = PlaygroundClient::with_api(PlaygroundConfig::new(), api.clone());
        let form = client.default_form().with_prompt("a red fox");

        let task = client.generate(&form).await.unwrap();

        assert_eq!(task.task_status, TaskStatus::Succeeded);
        assert_eq!(api.create_count(), 1);
        assert_eq!(api.query_count(), 2);
    }

    #[test]
    fn test_model_override() {
        let models = vec![ModelInfo {
            id: "m1".into(),
            name: "Model One".into(),
            model_type: ModelType::Dev,
            description: String::new(),
        }];
        let config = PlaygroundConfig::new().with_models(models);
        let client = PlaygroundClient::with_api(config, Arc::new(FakeTaskApi::new()));

        assert_eq!(client.models().len(), 1);
        assert_eq!(client.default_form().model.id, "m1");
    }
}
