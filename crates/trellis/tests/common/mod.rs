//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Edges of the six-vertex weighted example graph.
pub const SCENARIO_EDGES: &str = r#"{"from": 0, "to": 1, "weight": 4}
{"from": 0, "to": 2, "weight": 2}
{"from": 1, "to": 2, "weight": 1}
{"from": 1, "to": 3, "weight": 5}
{"from": 2, "to": 3, "weight": 8}
{"from": 2, "to": 4, "weight": 10}
{"from": 3, "to": 4, "weight": 2}
{"from": 3, "to": 5, "weight": 6}
{"from": 4, "to": 5, "weight": 3}
"#;

/// Path to the compiled trellis binary.
pub fn trellis_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_trellis"))
}

/// Run the trellis binary in `dir` with colors and env logging disabled.
pub fn run_trellis_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(trellis_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute trellis binary")
}

/// Write `content` to `dir/name` and return the path as a string.
pub fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path.to_string_lossy().into_owned()
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
