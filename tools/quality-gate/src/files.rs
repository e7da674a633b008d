use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

/// Status lines we treat as candidates: modified or added, one status
/// letter, whitespace, path. Everything else (deleted, renamed,
/// untracked) is dropped.
static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:M|A)\s+(?P<path>.*)").unwrap());

/// Which candidate file set a run operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// The version-control working-tree diff.
    ChangedFiles,
    /// Every file under the working directory.
    AllFiles,
}

/// Produce the candidate file list for the run. An empty result is not
/// an error; downstream checks simply skip with no matches.
pub fn candidate_files(mode: FileMode) -> Vec<String> {
    match mode {
        FileMode::AllFiles => all_files_under(Path::new(".")),
        FileMode::ChangedFiles => changed_files(),
    }
}

/// Recursively list every file under `root`, in traversal order.
pub fn all_files_under(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().display().to_string())
        .collect()
}

fn changed_files() -> Vec<String> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            parse_status_lines(&String::from_utf8_lossy(&output.stdout))
        }
        _ => {
            eprintln!("warning: `git status --porcelain` failed; no candidate files");
            Vec::new()
        }
    }
}

/// Extract paths from porcelain status output, preserving line order.
/// Lines that do not match the expected shape are ignored silently.
pub fn parse_status_lines(status: &str) -> Vec<String> {
    status
        .lines()
        .filter_map(|line| STATUS_LINE.captures(line))
        .map(|caps| caps["path"].to_string())
        .collect()
}
