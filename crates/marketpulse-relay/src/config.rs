use thiserror::Error;

/// Configuration errors for the relay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chat endpoint cannot be empty")]
    EmptyEndpoint,
    #[error("chat model cannot be empty")]
    EmptyModel,
    #[error("chat credential cannot be empty")]
    EmptyCredential,
}

/// Explicit relay configuration; the bearer credential is supplied by the
/// caller at construction time, never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    endpoint: String,
    model: String,
    credential: String,
    timeout_ms: u64,
}

impl ChatConfig {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let model = model.into();
        let credential = credential.into();

        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if credential.trim().is_empty() {
            return Err(ConfigError::EmptyCredential);
        }

        Ok(Self {
            endpoint,
            model,
            credential,
            timeout_ms: 10_000,
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
