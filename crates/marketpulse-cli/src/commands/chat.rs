use marketpulse_relay::{ChatConfig, ChatHistory, ChatRelay, ReqwestTransport};
use serde::Serialize;

use crate::cli::ChatArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ChatResponseData {
    reply: String,
    history: ChatHistory,
}

pub async fn run(args: &ChatArgs) -> Result<CommandResult, CliError> {
    let credential = match &args.api_key {
        Some(key) => key.clone(),
        None => std::env::var("MARKETPULSE_API_KEY").map_err(|_| {
            CliError::Command(String::from(
                "no credential: pass --api-key or set MARKETPULSE_API_KEY",
            ))
        })?,
    };

    let config = ChatConfig::new(&args.endpoint, &args.model, credential)
        .map_err(|error| CliError::Command(error.to_string()))?;
    let relay = ChatRelay::new(config, ReqwestTransport::default());

    // Each CLI invocation is one exchange; the history lives in the
    // emitted payload, owned by whoever drives the CLI.
    let exchange = relay.send(ChatHistory::new(), &args.prompt).await?;

    let data = serde_json::to_value(ChatResponseData {
        reply: exchange.reply,
        history: exchange.history,
    })?;

    Ok(CommandResult::ok(data))
}
