//! Vkstatus - VK music status widget.
//!
//! Vkstatus polls the VK `status.get` endpoint on a fixed interval and
//! renders the current track name into a persistent single-line status
//! surface on the terminal. The main pieces are:
//!
//! - Track poller service with a reactive current-track property
//! - File-backed secret store for the access token
//! - Masked terminal prompt for first-time token entry
//! - Single-line status bar that only rewrites on change
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vkstatus::services::track::TrackPollerService;
//!
//! # async fn run() {
//! let service = TrackPollerService::new();
//! service.start_loop("my-access-token".to_string()).await;
//!
//! // Watch the reactive label from a UI task
//! let label = service.current_track.get();
//! println!("{label}");
//! # }
//! ```

/// Command-line interface definition.
pub mod cli;

/// Configuration and state file paths.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Masked terminal prompt for token entry.
pub mod prompt;

/// Persistent secret storage for the access token.
pub mod secret_store;

/// Reactive services for remote status polling.
pub mod services;

/// Single-line terminal display surface.
pub mod status_bar;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Widget lifecycle: credential acquisition and loop control.
pub mod widget;

/// Re-exported core types for convenience.
pub use core::{Result, WidgetError};
