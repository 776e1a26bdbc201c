//! Terminal user interface
//!
//! A header with the link state, the transcript, and a command input.

mod app;
mod event;
mod theme;
mod ui;

pub mod widgets;

pub use app::{AppState, LinkState, TuiApp};
pub use event::AppEvent;
pub use theme::Theme;

use anyhow::Result;

/// Run the TUI against the given service endpoint
pub async fn run(endpoint: &str) -> Result<()> {
    let mut app = TuiApp::new(endpoint)?;
    app.run().await
}
