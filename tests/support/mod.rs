#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pm::model::Document;
use tempfile::TempDir;

pub const STATE_FILE: &str = "agent_status.json";

/// Scratch working directory for one CLI test
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join(STATE_FILE)
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_state_raw(&self) -> String {
        fs::read_to_string(self.state_path()).expect("read state file")
    }

    pub fn read_state(&self) -> Document {
        serde_json::from_str(&self.read_state_raw()).expect("parse state file")
    }

    /// `pm` running inside this directory with a clean environment
    pub fn pm(&self) -> Command {
        let mut cmd = pm_cmd();
        cmd.current_dir(self.path());
        cmd
    }

    /// Run `pm` with `args` and require success
    pub fn run(&self, args: &[&str]) {
        self.pm().args(args).assert().success();
    }
}

pub fn pm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pm").expect("binary");
    cmd.env_remove("PM_FILE").env_remove("RUST_LOG");
    cmd
}
