//! Command-line interface for the widget.
//!
//! Running without a subcommand starts the status widget itself.
//! `set-token` re-runs the masked token prompt and persists the result,
//! mirroring the in-widget "set credential" command.

use clap::{Parser, Subcommand};

/// VK music status widget.
#[derive(Debug, Parser)]
#[command(name = "vkstatus", version, about = "Shows your current VK track in a status line")]
pub struct Cli {
    /// Also write logs to a daily-rotated file in the config directory.
    #[arg(long)]
    pub log_file: bool,

    /// Optional subcommand; the widget runs when none is given.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Widget subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for a VK access token and store it for later runs.
    SetToken,
}
