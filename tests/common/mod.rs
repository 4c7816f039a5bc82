//! Common test utilities and helpers

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Temporary project with a `.claude/triggers` directory
pub struct TestProject {
    pub dir: TempDir,
}

/// Captured result of one `baton` invocation
pub struct HookRun {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join(".claude").join("triggers"))
            .expect("Failed to create triggers dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn triggers_dir(&self) -> PathBuf {
        self.root().join(".claude").join("triggers")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.triggers_dir().join("processed")
    }

    pub fn failed_dir(&self) -> PathBuf {
        self.triggers_dir().join("failed")
    }

    pub fn handoff_log(&self) -> PathBuf {
        self.root().join(".claude").join("agent-handoff.log")
    }

    pub fn write_trigger(&self, name: &str, content: &str) -> PathBuf {
        let path = self.triggers_dir().join(name);
        fs::write(&path, content).expect("Failed to write trigger");
        path
    }

    pub fn write_json_trigger(&self, name: &str, value: serde_json::Value) -> PathBuf {
        self.write_trigger(name, &value.to_string())
    }

    /// File names in `dir`, sorted; empty if the directory is missing
    pub fn names_in(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Run `baton stop` in this project with a stop-hook payload on stdin
    pub fn run_stop_hook(&self) -> HookRun {
        self.run_baton(&["stop", "--no-notify"], r#"{"conversation_id": "test"}"#)
    }

    pub fn run_baton(&self, args: &[&str], stdin: &str) -> HookRun {
        let mut child = self.spawn_baton(args);

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");

        Self::collect(child)
    }

    /// Run `baton` while holding its stdin open for the whole run
    pub fn run_baton_with_open_stdin(&self, args: &[&str]) -> (HookRun, Duration) {
        let started = Instant::now();
        let mut child = self.spawn_baton(args);
        let held_stdin = child.stdin.take();

        let run = Self::collect(child);
        let elapsed = started.elapsed();
        drop(held_stdin);

        (run, elapsed)
    }

    fn spawn_baton(&self, args: &[&str]) -> Child {
        Command::new(env!("CARGO_BIN_EXE_baton"))
            .args(args)
            .current_dir(self.root())
            .env_remove("BATON_ROOT")
            .env_remove("BATON_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn baton")
    }

    fn collect(child: Child) -> HookRun {
        let output = child.wait_with_output().expect("Failed to wait for baton");

        HookRun {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        }
    }
}
