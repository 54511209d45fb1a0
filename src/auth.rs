use crate::error::{PlaygroundError, Result};
use async_trait::async_trait;
use std::env;

/// Supplies the bearer token attached to every request.
///
/// Called once per request, so implementations that refresh short-lived
/// session tokens can do so here.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Reads the token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new("FLUX_API_TOKEN")
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn bearer_token(&self) -> Result<String> {
        env::var(&self.var)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| PlaygroundError::AuthError(format!("{} is not set", self.var)))
    }
}
