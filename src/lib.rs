//! pm - Project Coordination Library
//!
//! This library provides the core functionality for the pm CLI tool, which
//! tracks epics, tickets, and agent assignments for agent-based development
//! in a single local JSON file.
//!
//! # Core Concepts
//!
//! - **Epics**: Groups of tickets with completion counters
//! - **Tickets**: Units of work owned by exactly one agent at a time
//! - **Agents**: Named workers whose current ticket is tracked
//! - **Risk Status**: Green/yellow/red verdict backed by a risk document
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.pm.toml`
//! - `error`: Error types and result aliases
//! - `model`: Persisted document types
//! - `board`: State transitions for epics, tickets, and agents
//! - `report`: Read-only status report
//! - `risk`: Risk status parsing and risk document checks
//! - `store`: Load/save of the state file
//! - `lock`: File locking and atomic writes for concurrency safety
//! - `output`: Human and JSON output

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod output;
pub mod report;
pub mod risk;
pub mod store;

pub use error::{Error, Result};
