mod command;
mod config;
mod view;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{ApplicationListing, HttpRecordSource, RecordSource};
use shared::domain::Application;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::config::{load_settings, CliOverrides};

#[derive(Parser, Debug)]
#[command(about = "Browse loan applications page by page")]
struct Args {
    /// TOML file with api_url, page_size and request_timeout_secs.
    #[arg(long, default_value = "listing.toml")]
    config: PathBuf,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn dispatch(listing: &Arc<ApplicationListing>, command: Command) {
    let listing = Arc::clone(listing);
    tokio::spawn(async move {
        match command {
            Command::LoadMore => listing.fetch_next_page().await,
            Command::Refetch => listing.refetch().await,
            Command::Retry => listing.reset_and_fetch().await,
            Command::Quit => {}
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(
        &args.config,
        &CliOverrides {
            api_url: args.api_url,
            page_size: args.page_size,
            request_timeout_secs: args.timeout_secs,
        },
    )?;
    tracing::info!(
        api_url = %settings.api_url,
        page_size = settings.page_size.get(),
        "opening application listing"
    );

    let source = HttpRecordSource::new(&settings.api_url, settings.request_timeout)?;
    let source: Arc<dyn RecordSource<Application>> = Arc::new(source);
    let listing = ApplicationListing::unloaded(source, settings.page_size);

    let mut updates = listing.subscribe();
    println!("{HELP}");
    dispatch(&listing, Command::Retry);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => dispatch(&listing, command),
                    None => println!("unknown command {:?}; {HELP}", line.trim()),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", view::render_listing(&snapshot));
            }
        }
    }

    Ok(())
}
