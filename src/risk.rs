//! Project risk status.
//!
//! The risk assessment itself lives in a markdown document maintained by
//! hand; pm only checks that it exists and records the resulting
//! green/yellow/red verdict in the project state.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::RiskStatus;

/// Values accepted by `update_risk_status`
pub const SETTABLE_RISK_STATUSES: [&str; 3] = ["green", "yellow", "red"];

/// Parse a risk status given on the command line.
///
/// Only `green`, `yellow` and `red` are accepted, case-sensitively.
/// `unknown` is the initial state and cannot be set back.
pub fn parse_risk_status(value: &str) -> Result<RiskStatus> {
    match value {
        "green" => Ok(RiskStatus::Green),
        "yellow" => Ok(RiskStatus::Yellow),
        "red" => Ok(RiskStatus::Red),
        other => Err(Error::InvalidRiskStatus(other.to_string())),
    }
}

/// Traffic-light indicator for a risk status
pub fn risk_indicator(status: RiskStatus) -> &'static str {
    match status {
        RiskStatus::Green => "🟢",
        RiskStatus::Yellow => "🟡",
        RiskStatus::Red => "🔴",
        RiskStatus::Unknown => "⚪",
    }
}

/// Whether the risk assessment document is present
#[derive(Debug, Clone, Serialize)]
pub struct RiskDocument {
    pub path: PathBuf,
    pub found: bool,
}

impl RiskDocument {
    /// Look for the configured risk document under `root`.
    ///
    /// `path` keeps the configured spelling for display.
    pub fn check(config: &Config, root: &Path) -> Self {
        Self {
            path: config.docs.risks.clone(),
            found: config.risks_path(root).is_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_traffic_light_values() {
        assert_eq!(parse_risk_status("green").unwrap(), RiskStatus::Green);
        assert_eq!(parse_risk_status("yellow").unwrap(), RiskStatus::Yellow);
        assert_eq!(parse_risk_status("red").unwrap(), RiskStatus::Red);
    }

    #[test]
    fn rejects_other_values_case_sensitively() {
        for value in ["purple", "Green", "RED", "unknown", ""] {
            let err = parse_risk_status(value).unwrap_err();
            assert!(matches!(err, Error::InvalidRiskStatus(_)), "{value}");
        }
    }

    #[test]
    fn check_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let missing = RiskDocument::check(&config, dir.path());
        assert!(!missing.found);
        assert_eq!(missing.path, PathBuf::from("docs/RISKS.md"));

        let absolute = config.risks_path(dir.path());
        std::fs::create_dir_all(absolute.parent().unwrap()).unwrap();
        std::fs::write(&absolute, "# Risks\n").unwrap();
        assert!(RiskDocument::check(&config, dir.path()).found);
    }
}
