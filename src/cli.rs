use clap::Parser;

pub const DEFAULT_FEED_URL: &str = "http://127.0.0.1:8080";

pub const FEED_URL_HELP: &str =
    "Base URL of the market feed; the bar fetches data/market.json relative to it.";
pub const REFRESH_SECS_HELP: &str =
    "Override the refresh cadence in seconds, at least 1 (defaults to 300, i.e. every five minutes).";
pub const ONCE_HELP: &str = "Render the bar after the first successful refresh and exit.";
pub const NO_COLOR_HELP: &str = "Disable ANSI colors in the rendered bar.";

#[derive(Debug, Parser)]
#[command(
    name = "market_bar",
    about = "Terminal market bar: EGX30/EGX70 daily change and the USD/EGP rate, refreshed from a small JSON feed.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, value_name = "URL", default_value = DEFAULT_FEED_URL, help = FEED_URL_HELP)]
    pub feed_url: String,
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        help = REFRESH_SECS_HELP
    )]
    pub refresh_secs: Option<u64>,
    #[arg(long, help = ONCE_HELP)]
    pub once: bool,
    #[arg(long, help = NO_COLOR_HELP)]
    pub no_color: bool,
}
