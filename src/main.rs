//! pm - project coordination CLI
//!
//! Tracks epics, tickets, and agent assignments for agent-based development
//! in a single local JSON file.

use pm::cli::Cli;
use pm::error::Error;
use pm::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Tracing is opt-in via RUST_LOG and always writes to stderr.
    // Ignore invalid/huge filters so startup never fails on them.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = infer_command_name_from_args();

    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            // Nothing parsed, so fall back to scanning the raw arguments.
            let json = std::env::args().any(|arg| arg == "--json");
            exit_with(&command, &err, json)
        }
    };

    let json = cli.json;
    if let Err(err) = cli.run() {
        exit_with(&command, &err, json);
    }
}

fn exit_with(command: &str, err: &Error, json: bool) -> ! {
    let _ = emit_error(command, err, json);
    std::process::exit(err.exit_code())
}
