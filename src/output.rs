//! Shared output formatting for pm commands.
//!
//! Human output goes to stdout. Rejected commands (usage, not found,
//! ownership, validation) are reported on stdout as well, since they are an
//! expected answer rather than a failure; fatal errors go to stderr.

use serde::Serialize;

use crate::error::{Error, JsonError, Result};

pub const SCHEMA_VERSION: &str = "pm.v1";

/// Marker prefixed to rejected operations in human output
pub const REJECTION_MARKER: &str = "❌";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            details: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let warnings = human.map(|h| h.warnings.clone()).unwrap_or_default();
        let next_steps = human.map(|h| h.next_steps.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings,
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        println!("{}", format_human(human));
    }

    Ok(())
}

/// Print text that has no JSON form (help text)
pub fn emit_text(text: &str) {
    println!("{text}");
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if json {
        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: JsonError,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: if err.is_rejection() { "rejected" } else { "error" },
            error: JsonError::from(err),
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if err.is_rejection() {
        println!("{}", format_rejection(err));
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Human line for a rejected command.
///
/// Usage and unknown-command messages are printed as-is; domain rejections
/// carry the rejection marker.
pub fn format_rejection(err: &Error) -> String {
    match err {
        Error::Usage(_) | Error::UnknownCommand(_) => err.to_string(),
        _ => format!("{REJECTION_MARKER} {err}"),
    }
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = Vec::new();
    lines.push(output.header.clone());

    push_section(&mut lines, "Details", &output.details);
    push_section(&mut lines, "Warnings", &output.warnings);
    push_section(&mut lines, "Next steps", &output.next_steps);

    lines.join("\n")
}

/// First positional argument of the current process, skipping global flags.
pub fn infer_command_name_from_args() -> String {
    command_name_from(std::env::args().skip(1))
}

/// First positional argument of `args`, skipping global flags and the value
/// of `--file`.
pub fn command_name_from(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--file" {
            args.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return arg;
    }
    "pm".to_string()
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::EpicNotFound(_) | Error::TicketNotFound(_) => vec!["pm status".to_string()],
        Error::NotAssigned { ticket, agent, .. } => {
            vec![format!("pm assign {ticket} {agent}")]
        }
        Error::StateParse { path, .. } => {
            vec![format!("fix or remove {} then retry", path.display())]
        }
        Error::InvalidConfig(_) => vec!["fix .pm.toml then retry".to_string()],
        Error::LockFailed(path) => vec![format!(
            "another pm command is running; retry or remove {} if stale",
            path.display()
        )],
        _ => Vec::new(),
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{title}:"));
    for item in items {
        lines.push(format!("- {item}"));
    }
}
