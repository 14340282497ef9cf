mod analyze;
mod chat;
mod news;

use marketpulse_core::{Envelope, EnvelopeError, EnvelopeMeta};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args)?,
        Command::News(args) => news::run(args)?,
        Command::Chat(args) => chat::run(args).await?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|error| CliError::Command(format!("cannot format timestamp: {error}")))?;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), generated_at)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
