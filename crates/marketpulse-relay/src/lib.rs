//! Chat-completion relay for marketpulse.
//!
//! The original dashboard called a hosted chat endpoint with a hardcoded
//! credential and ambient session history. Here both are explicit: the
//! credential is injected at call time via [`ChatConfig`], and the
//! conversation history is a caller-owned value passed into and returned
//! from every exchange.

pub mod config;
pub mod history;
pub mod relay;
pub mod transport;

pub use config::{ChatConfig, ConfigError};
pub use history::{ChatHistory, ChatMessage, ChatRole};
pub use relay::{ChatExchange, ChatRelay, RelayError};
pub use transport::{CannedTransport, ChatTransport, ReqwestTransport, TransportError};
