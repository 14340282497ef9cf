use marketpulse_core::{relevant_news, NewsFeed, NewsSource, SampleNewsSource, Symbol};
use serde::Serialize;

use crate::cli::NewsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct NewsResponseData {
    ticker: String,
    matched: bool,
    feed: NewsFeed,
}

pub fn run(args: &NewsArgs) -> Result<CommandResult, CliError> {
    if args.limit == 0 {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let symbol = Symbol::parse(&args.ticker)?;
    let feed = SampleNewsSource
        .news(&symbol)
        .map_err(|error| CliError::Command(error.to_string()))?;

    let filtered = relevant_news(&feed, &symbol);
    // The filter falls back to the whole feed when nothing mentions the
    // ticker; flag that so the caller can label the panel.
    let needle = symbol.as_str().to_ascii_lowercase();
    let matched = filtered.items.iter().any(|item| {
        item.title.to_ascii_lowercase().contains(&needle)
            || item.summary.to_ascii_lowercase().contains(&needle)
    });

    let mut items = filtered.items;
    items.truncate(args.limit);

    let data = serde_json::to_value(NewsResponseData {
        ticker: symbol.to_string(),
        matched,
        feed: NewsFeed::new(items),
    })?;

    let mut result = CommandResult::ok(data);
    if !matched && !feed.is_empty() {
        result = result.with_warning("no items mention the ticker; showing the unfiltered feed");
    }
    Ok(result)
}
