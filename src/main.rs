use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use log::info;
use market_bar::cli::Cli;
use market_bar::render::render_bar;
use market_bar::{FeedClient, Page, REFRESH_INTERVAL, mount_every};
use reqwest::Client;
use std::time::Duration;

const HTTP_TIMEOUT_SECONDS: u64 = 20;
const CONTAINER_ID: &str = "market_bar";

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    colored::control::set_override(!cli.no_color);

    let client = Client::builder()
        .user_agent(concat!("market-bar/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
        .build()
        .context("failed to build HTTP client")?;
    let feed = FeedClient::new(client, cli.feed_url);

    let page = Page::new();
    page.add_container(CONTAINER_ID);

    let every = cli.refresh_secs.map_or(REFRESH_INTERVAL, Duration::from_secs);
    let handle = mount_every(&page, CONTAINER_ID, feed, every)
        .context("mount target is missing from the page")?;
    print_bar(&page);

    let mut updates = handle.updates();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print_bar(&page);
                if cli.once {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl-C, shutting down");
                break;
            }
        }
    }

    handle.dispose();
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn print_bar(page: &Page) {
    if let Some(bar) = render_bar(page, CONTAINER_ID) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        println!("{} {bar}", stamp.bright_black());
    }
}
