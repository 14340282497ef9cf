//! CLI argument definitions for marketpulse.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Normalize a price history and compute indicators |
//! | `news` | Fetch and relevance-filter a ticker news feed |
//! | `chat` | One exchange with the configured chat endpoint |
//!
//! Global options: `--format` (json, ndjson), `--pretty`, `--strict`
//! (warnings or errors fail the command, exit code 5).

use clap::{Args, Parser, Subcommand, ValueEnum};

/// marketpulse - single-user stock analytics CLI.
#[derive(Debug, Parser)]
#[command(
    name = "marketpulse",
    author,
    version,
    about = "Stock analytics: canonical price series, indicators, sentiment, news"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full indicator pipeline for a ticker and date range.
    Analyze(AnalyzeArgs),
    /// Show news items relevant to a ticker.
    News(NewsArgs),
    /// Send one prompt to the chat-completion endpoint.
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Ticker symbol, e.g. TSLA.
    pub ticker: String,

    /// Start of the user-visible date range (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,

    /// End of the user-visible date range (YYYY-MM-DD).
    #[arg(long)]
    pub end: String,

    /// Chart encoding to project.
    #[arg(long, value_enum, default_value_t = ChartSelector::Line)]
    pub chart: ChartSelector,

    /// Upstream table shape to request from the sample source.
    #[arg(long, value_enum, default_value_t = ShapeSelector::Flat)]
    pub shape: ShapeSelector,
}

/// Chart encoding selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartSelector {
    Line,
    Bar,
    Candlestick,
}

/// Sample-source table shape selection (exercises every upstream shape the
/// normalizer accepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeSelector {
    Flat,
    CompoundLabels,
    IndexedDates,
    NoAdjustedClose,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Ticker symbol, e.g. TSLA.
    pub ticker: String,

    /// Maximum number of items to show.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Prompt to send.
    pub prompt: String,

    /// Chat-completion endpoint URL.
    #[arg(long, default_value = "https://api.groq.com/openai/v1/chat/completions")]
    pub endpoint: String,

    /// Model identifier.
    #[arg(long, default_value = "llama3-8b-8192")]
    pub model: String,

    /// Bearer credential; falls back to the MARKETPULSE_API_KEY
    /// environment variable when omitted.
    #[arg(long)]
    pub api_key: Option<String>,
}
