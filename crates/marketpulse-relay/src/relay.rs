use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChatConfig;
use crate::history::{ChatHistory, ChatMessage};
use crate::transport::{ChatTransport, TransportError};

/// Relay failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    #[error("chat transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("chat endpoint returned status {code}")]
    Status { code: u16 },

    #[error("chat response is missing a reply")]
    MalformedResponse,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of one prompt/reply round trip: the reply plus the extended,
/// still caller-owned history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub reply: String,
    pub history: ChatHistory,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Stateless client for a hosted chat-completion endpoint.
pub struct ChatRelay<T: ChatTransport> {
    config: ChatConfig,
    transport: T,
}

impl<T: ChatTransport> ChatRelay<T> {
    pub fn new(config: ChatConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Send one prompt in the context of `history`.
    ///
    /// The input history is consumed and returned extended by exactly one
    /// user and one assistant message; it is never stored by the relay.
    pub async fn send(
        &self,
        history: ChatHistory,
        prompt: &str,
    ) -> Result<ChatExchange, RelayError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(RelayError::EmptyPrompt);
        }

        let prompt_message = ChatMessage::user(prompt);
        let messages = history
            .messages()
            .iter()
            .chain(std::iter::once(&prompt_message))
            .collect::<Vec<_>>();

        let body = serde_json::to_string(&CompletionRequest {
            model: self.config.model(),
            messages,
        })?;

        let response = self
            .transport
            .post_json(
                self.config.endpoint(),
                self.config.credential(),
                body,
                self.config.timeout_ms(),
            )
            .await?;

        if !response.is_success() {
            return Err(RelayError::Status {
                code: response.status,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&response.body)?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(RelayError::MalformedResponse)?;

        Ok(ChatExchange {
            history: history.with_exchange(prompt, reply.clone()),
            reply,
        })
    }
}
