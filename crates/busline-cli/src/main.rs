//! Busline CLI Application
//!
//! Command-line client for searching bus routes, booking seats and managing
//! bookings against a bus booking service.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use busline_core::{GatewayConfig, HttpGateway, StoreBuilder};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        state_file,
        api_url,
        token,
        timeout,
        no_color,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_state_path(state_file)
        .build()
        .await
        .context("Failed to open local state")?;

    let config = GatewayConfig::new(api_url)
        .with_token(token)
        .with_timeout(timeout);
    let gateway = HttpGateway::new(&config).context("Failed to set up the booking service client")?;

    info!("Busline started against {}", gateway.base_url());

    let cli = Cli::new(
        Arc::new(store),
        Arc::new(gateway),
        TerminalRenderer::new(!no_color),
    );

    match command {
        Search(args) => cli.search(args.into()).await,
        Providers(args) => cli.providers(args.into()).await,
        Provider(args) => cli.provider(args).await,
        Book(args) => cli.book(args).await,
        Bookings(args) => cli.bookings(args).await,
        Show(args) => cli.show(args.into()).await,
        Cancel(args) => cli.cancel(args).await,
        Profile { command } => cli.profile(command).await,
        Chat(args) => cli.chat(args).await,
    }
}
