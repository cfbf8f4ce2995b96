//! Command-line interface for pm
//!
//! This module defines the CLI structure using clap derive macros.
//! Handlers live in submodules grouped by the records they touch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{command_name_from, emit_text, OutputOptions};
use crate::store::StateStore;

mod epic;
mod risks;
mod status;
mod ticket;

/// pm - project coordination for agent-based development
///
/// Tracks epics, tickets, and agent assignments in a single JSON file.
#[derive(Parser, Debug)]
#[command(name = "pm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// State file (defaults to agent_status.json in the current directory)
    #[arg(long, global = true, env = "PM_FILE")]
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show project status
    Status {
        /// Extra arguments are accepted and ignored
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Create an epic
    Epic {
        /// Epic ID
        id: String,

        /// Epic name
        name: String,

        /// Description (remaining words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Create a ticket within an epic
    Ticket {
        /// Ticket ID
        id: String,

        /// Epic the ticket belongs to
        epic_id: String,

        /// Ticket title
        title: String,

        /// Agent the ticket is created for
        agent: String,

        /// Optional description (remaining words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Assign a ticket to an agent
    Assign {
        /// Ticket ID
        ticket_id: String,

        /// Agent name
        agent: String,

        /// Extra arguments are accepted and ignored
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Start working on a ticket
    Start {
        /// Ticket ID
        ticket_id: String,

        /// Agent name (must be the assignee)
        agent: String,

        /// Extra arguments are accepted and ignored
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Complete a ticket
    Complete {
        /// Ticket ID
        ticket_id: String,

        /// Agent name (must be the assignee)
        agent: String,

        /// Files modified while working on the ticket
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        files: Vec<String>,
    },

    /// Show risk status
    Risks {
        /// Extra arguments are accepted and ignored
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Update risk status
    #[command(name = "update_risk_status", alias = "update-risk-status")]
    UpdateRiskStatus {
        /// green, yellow, or red
        #[arg(allow_hyphen_values = true)]
        status: String,

        /// Extra arguments are accepted and ignored
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },
}

/// Usage line for commands that take positional arguments
pub fn usage_for(command: &str) -> Option<&'static str> {
    match command {
        "status" => Some("pm status"),
        "risks" => Some("pm risks"),
        "epic" => Some("pm epic <id> <name> <description...>"),
        "ticket" => Some("pm ticket <id> <epic_id> <title> <agent> [description...]"),
        "assign" => Some("pm assign <ticket_id> <agent>"),
        "start" => Some("pm start <ticket_id> <agent>"),
        "complete" => Some("pm complete <ticket_id> <agent> [files...]"),
        "update_risk_status" | "update-risk-status" => {
            Some("pm update_risk_status <green|yellow|red>")
        }
        _ => None,
    }
}

/// Resolved per-invocation environment shared by all handlers
#[derive(Debug)]
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub store: StateStore,
    pub output: OutputOptions,
}

impl Context {
    /// Resolve config and state file under `root`.
    ///
    /// An explicit `file` (flag or `PM_FILE`) wins over `.pm.toml`.
    pub fn resolve(root: &Path, file: Option<PathBuf>, output: OutputOptions) -> Self {
        let config = Config::load_from_dir(root);
        let path = match file {
            Some(file) => root.join(file),
            None => config.state_path(root),
        };
        let store = StateStore::new(path).with_lock_timeout(config.store.lock_timeout_ms);
        tracing::debug!(state_file = %store.path().display(), "resolved state file");

        Self {
            root: root.to_path_buf(),
            config,
            store,
            output,
        }
    }
}

impl Cli {
    /// Parse the process arguments.
    ///
    /// Missing positional arguments, stray flags, and unknown commands become
    /// rejections so they are reported like any other refused operation.
    /// Help and version are handled by clap, which exits the process.
    pub fn parse_args() -> Result<Self> {
        Self::parse_args_from(std::env::args_os())
    }

    pub fn parse_args_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match Self::try_parse_from(args.iter().cloned()) {
            Ok(cli) => Ok(cli),
            Err(err) => {
                let command = command_name_from(
                    args.iter()
                        .skip(1)
                        .map(|arg| arg.to_string_lossy().into_owned()),
                );
                match err.kind() {
                    ErrorKind::InvalidSubcommand => Err(Error::UnknownCommand(command)),
                    ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument => {
                        match usage_for(&command) {
                            Some(usage) => Err(Error::Usage(usage)),
                            None => err.exit(),
                        }
                    }
                    _ => err.exit(),
                }
            }
        }
    }

    /// Execute the parsed command
    pub fn run(self) -> Result<()> {
        let Cli {
            file,
            json,
            quiet,
            command,
        } = self;

        let root = std::env::current_dir()?;
        let ctx = Context::resolve(&root, file, OutputOptions { json, quiet });
        ctx.store.ensure_initialized()?;

        let Some(command) = command else {
            emit_text(&Cli::command().render_help().to_string());
            return Ok(());
        };

        match command {
            Commands::Status { .. } => status::run(&ctx),
            Commands::Epic {
                id,
                name,
                description,
            } => epic::run_create(
                &ctx,
                epic::CreateOptions {
                    id,
                    name,
                    description: description.join(" "),
                },
            ),
            Commands::Ticket {
                id,
                epic_id,
                title,
                agent,
                description,
            } => ticket::run_create(
                &ctx,
                ticket::CreateOptions {
                    id,
                    epic_id,
                    title,
                    agent,
                    description: description.join(" "),
                },
            ),
            Commands::Assign {
                ticket_id,
                agent,
                ..
            } => {
                ticket::run_assign(&ctx, ticket::AssignOptions { ticket_id, agent })
            }
            Commands::Start {
                ticket_id,
                agent,
                ..
            } => {
                ticket::run_start(&ctx, ticket::StartOptions { ticket_id, agent })
            }
            Commands::Complete {
                ticket_id,
                agent,
                files,
            } => ticket::run_complete(
                &ctx,
                ticket::CompleteOptions {
                    ticket_id,
                    agent,
                    files: if files.is_empty() { None } else { Some(files) },
                },
            ),
            Commands::Risks { .. } => risks::run_show(&ctx),
            Commands::UpdateRiskStatus { status, .. } => risks::run_update(&ctx, &status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epic_description_collects_remaining_words() {
        let cli = Cli::parse_args_from(["pm", "epic", "E1", "Auth", "login", "and", "sessions"])
            .unwrap();
        match cli.command {
            Some(Commands::Epic { description, .. }) => {
                assert_eq!(description.join(" "), "login and sessions")
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn hyphen_words_are_positional_values() {
        let cli = Cli::parse_args_from(["pm", "epic", "E1", "Auth", "fix", "-v", "--json"])
            .unwrap();
        assert!(!cli.json);
        assert!(matches!(
            cli.command,
            Some(Commands::Epic { description, .. }) if description == ["fix", "-v", "--json"]
        ));

        let cli = Cli::parse_args_from(["pm", "complete", "T1", "alice", "--weird-name.rs"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { files, .. }) if files == ["--weird-name.rs"]
        ));

        let cli = Cli::parse_args_from(["pm", "update_risk_status", "-green"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::UpdateRiskStatus { status, .. }) if status == "-green"
        ));
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        let cli = Cli::parse_args_from(["pm", "status", "extra"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { .. })));

        let cli = Cli::parse_args_from(["pm", "assign", "T1", "alice", "x"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Assign { ticket_id, agent, .. }) if ticket_id == "T1" && agent == "alice"
        ));
    }

    #[test]
    fn stray_flags_become_usage_rejection() {
        let err = Cli::parse_args_from(["pm", "start", "--bogus", "T1", "alice"]).unwrap_err();
        assert!(matches!(err, Error::Usage("pm start <ticket_id> <agent>")));
    }

    #[test]
    fn missing_arguments_become_usage_rejection() {
        let err = Cli::parse_args_from(["pm", "epic", "E1", "Auth"]).unwrap_err();
        assert!(matches!(err, Error::Usage(usage) if usage.starts_with("pm epic")));

        let err = Cli::parse_args_from(["pm", "--file", "x.json", "assign", "T1"]).unwrap_err();
        assert!(matches!(err, Error::Usage("pm assign <ticket_id> <agent>")));

        let err = Cli::parse_args_from(["pm", "update_risk_status"]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn unknown_command_is_rejected_by_name() {
        let err = Cli::parse_args_from(["pm", "deploy"]).unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "deploy"));
    }

    #[test]
    fn complete_files_are_optional() {
        let cli = Cli::parse_args_from(["pm", "complete", "T1", "alice"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { files, .. }) if files.is_empty()
        ));

        let cli = Cli::parse_args_from(["pm", "complete", "T1", "alice", "a.go", "b.go"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { files, .. }) if files.len() == 2
        ));
    }

    #[test]
    fn update_risk_status_accepts_both_spellings() {
        for name in ["update_risk_status", "update-risk-status"] {
            let cli = Cli::parse_args_from(["pm", name, "red"]).unwrap();
            assert!(matches!(
                cli.command,
                Some(Commands::UpdateRiskStatus { status, .. }) if status == "red"
            ));
        }
    }

    #[test]
    fn no_command_parses_to_help() {
        let cli = Cli::parse_args_from(["pm"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn explicit_file_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".pm.toml"), "state_file = \"from-config.json\"").unwrap();
        let output = OutputOptions {
            json: false,
            quiet: false,
        };

        let ctx = Context::resolve(dir.path(), None, output);
        assert_eq!(ctx.store.path(), dir.path().join("from-config.json"));

        let ctx = Context::resolve(dir.path(), Some(PathBuf::from("flag.json")), output);
        assert_eq!(ctx.store.path(), dir.path().join("flag.json"));
    }
}
