#![forbid(unsafe_code)]
//! `agent-watch`: reads agent session events as JSON lines on stdin and
//! prints one compact summary line per event.
//!
//! Built to sit at the end of a pipe (typically after a `tee` stage): output
//! failures never propagate back to the producer, and the exit status is 0
//! for any input. Only an invalid command line exits non-zero.

use std::io::{self, IsTerminal};

use clap::Parser;
use watch_events::{Palette, WatchConfig, WatchDriver};

#[derive(Debug, Parser)]
#[command(name = "agent-watch")]
#[command(about = "Filter agent session JSON output into readable lines")]
struct Cli {
    /// Show text responses in addition to tool calls.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = WatchConfig {
        verbose: cli.verbose,
        palette: detect_palette(),
        ..WatchConfig::default()
    };

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    WatchDriver::new(stdin, stdout, config).run();
}

fn detect_palette() -> Palette {
    Palette::from_capability(
        io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    )
}
