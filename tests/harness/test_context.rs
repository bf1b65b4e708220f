//! Shared testing harness for `context-forge` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const STATEMENTS_PATH: &str = "project-documents/user/statements/context-statements.md";
pub(crate) const PROMPTS_PATH: &str = "project-documents/project-guides/prompt.ai-project.system.md";

pub(crate) const SAMPLE_PROJECT: &str = r#"{
  "id": "project-1",
  "name": "Test Project",
  "template": "react-nextjs",
  "slice": "foundation",
  "instruction": "implementation",
  "isMonorepo": false,
  "customData": {
    "recentEvents": "Added authentication system",
    "additionalNotes": "Focus on error handling"
  }
}"#;

/// Testing harness providing an isolated working directory for CLI runs.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled binary in the work directory.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("context-forge").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.root.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Run `context-forge init` and assert success.
    pub(crate) fn init(&self) {
        self.cli().arg("init").assert().success();
    }

    /// Write a file relative to the work directory, creating parents.
    pub(crate) fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }

    pub(crate) fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }

    /// Write the sample project record and return its relative path.
    pub(crate) fn write_sample_project(&self) -> &'static str {
        self.write("project.json", SAMPLE_PROJECT);
        "project.json"
    }
}
