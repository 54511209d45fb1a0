use crate::{
    auth::CredentialProvider,
    config::PlaygroundConfig,
    error::{PlaygroundError, Result},
    models::{GenerateRequest, GenerateResponse, TaskEnvelope, TaskQuery},
    transport::traits::TaskApi,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub struct HttpTaskApi {
    client: Client,
    generate_url: String,
    task_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpTaskApi {
    pub fn new(config: &PlaygroundConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlaygroundError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            generate_url: config.generate_url(),
            task_url: config.task_url(),
            credentials,
        })
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let token = self.credentials.bearer_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Request to {} failed: {}", url, e);
                PlaygroundError::from(e)
            })?;

        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("{} answered {}: {}", url, status, error_text);
            return Err(PlaygroundError::Transport(format!(
                "Network response error: HTTP {}",
                status
            )));
        }

        let text = response.text().await?;
        log::debug!("{} responded: {}", url, text);

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn create_task(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        log::info!(
            "Creating task with model: {} ({})",
            request.model,
            request.aspect_ratio
        );
        self.post(&self.generate_url, request).await
    }

    async fn query_task(&self, flux_id: &str) -> Result<TaskEnvelope> {
        log::debug!("Querying task {}", flux_id);
        let query = TaskQuery {
            flux_id: flux_id.to_string(),
        };
        self.post(&self.task_url, &query).await
    }
}
