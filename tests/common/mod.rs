#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runs the binary with `HOME` and the working directory inside a temp dir,
/// so no real config or `.env` file is touched.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("naturedopes-cli");
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("API_URL")
            .env_remove("API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".naturedopes-cli").join("config.json")
    }

    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().expect("failed to run naturedopes-cli");
        assert!(
            output.status.success(),
            "command failed: stdout={}, stderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf-8 stdout")
    }
}
