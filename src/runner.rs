//! Application Runner Module
//!
//! Sets up logging and the async runtime, then hands over to the TUI.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::XdgDirs;
use crate::connection::DEFAULT_ENDPOINT;

/// Runtime configuration assembled by the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service WebSocket endpoint
    pub endpoint: String,
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Log file; defaults to the XDG state directory
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug: false,
            verbose: false,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,trade_console=debug"
        }
    }
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if logging cannot be set up or the TUI fails to start.
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    init_logging(&config)?;
    tracing::info!(endpoint = %config.endpoint, "Starting trade console");

    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    runtime.block_on(crate::tui::run(&config.endpoint))
}

/// Route tracing output to a file; the terminal belongs to the UI.
fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let path = prepare_log_path(config)?;
    let log_file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .try_init()?;

    Ok(())
}

/// Resolve the log file and make sure its directory exists.
fn prepare_log_path(config: &AppConfig) -> anyhow::Result<PathBuf> {
    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            Ok(path.clone())
        }
        None => {
            let dirs = XdgDirs::default();
            dirs.ensure_dirs().with_context(|| {
                format!("Failed to create state directory {}", dirs.state.display())
            })?;
            Ok(dirs.log_file())
        }
    }
}
