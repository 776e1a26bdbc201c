//! Trade Console - chat with a trading agent from the terminal

use std::path::PathBuf;

use clap::Parser;
use trade_console::config::parse_endpoint;
use trade_console::connection::DEFAULT_ENDPOINT;
use trade_console::runner::{run_tui, AppConfig};

/// Trade Console - send trading commands, read the agent's replies
#[derive(Parser, Debug)]
#[command(name = "trade-console")]
#[command(version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint of the trading agent service
    #[arg(
        short = 'e',
        long,
        env = "TRADE_CONSOLE_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        value_parser = parse_endpoint
    )]
    endpoint: String,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Write logs here instead of the XDG state directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            endpoint: args.endpoint,
            debug: args.debug,
            verbose: args.verbose,
            log_file: args.log_file,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_tui(AppConfig::from(args))
}
