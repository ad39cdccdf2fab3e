//! Vkstatus entry point.
//!
//! Runs the status widget by default; `set-token` only prompts for and
//! stores the VK access token, for use on the next run.

use std::{error::Error, fs, sync::Arc};

use clap::Parser;
use futures::StreamExt;
use tracing::info;
use vkstatus::{
    cli::{Cli, Command},
    config::ConfigPaths,
    prompt::{TerminalPrompt, TokenPrompt},
    secret_store::{FileSecretStore, SecretStore, TOKEN_KEY},
    status_bar::StatusBar,
    tracing_config,
    widget::{CANCELLED_NOTICE, TrackWidget},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.log_file {
        tracing_config::init_with_file()?;
    } else {
        tracing_config::init()?;
    }

    ensure_widget_directories()?;

    match cli.command {
        Some(Command::SetToken) => set_token().await,
        None => run_widget().await,
    }
}

/// Re-runs the prompt-and-store flow without starting the widget.
async fn set_token() -> Result<(), Box<dyn Error>> {
    let store = FileSecretStore::new()?;

    match TerminalPrompt.read_token().await? {
        Some(token) => {
            store.set(TOKEN_KEY, &token).await?;
            println!("Token stored.");
        }
        None => println!("{CANCELLED_NOTICE}"),
    }

    Ok(())
}

/// Full widget lifecycle: activate, mirror track updates onto the status
/// bar, tear down on Ctrl-C.
async fn run_widget() -> Result<(), Box<dyn Error>> {
    info!("Starting vkstatus widget");

    let store = Arc::new(FileSecretStore::new()?);
    let widget = TrackWidget::new(store, Arc::new(TerminalPrompt));

    if !widget.activate().await? {
        // Cancelled token entry: nothing to poll.
        return Ok(());
    }

    let mut bar = StatusBar::stdout();
    let mut labels = Box::pin(widget.service().current_track.watch());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(label) = labels.next() => {
                // The property starts blank; the surface stays empty until
                // the first poll lands.
                if !label.is_empty() {
                    bar.set_track(&label);
                }
            }
        }
    }

    info!("Shutting down");
    widget.deactivate().await;
    bar.dispose();

    Ok(())
}

fn ensure_widget_directories() -> Result<(), Box<dyn Error>> {
    let config_dir = ConfigPaths::config_dir()?;
    if !config_dir.exists() {
        info!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir)?;
    }
    Ok(())
}
