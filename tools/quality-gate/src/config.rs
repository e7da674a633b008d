use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Argument-template element that expands to the matched file paths.
pub const FILES_PLACEHOLDER: &str = "{files}";

/// How a check's invocation result is turned into pass/fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Any text on stdout or stderr is a finding, regardless of exit
    /// status. This is the default because several of the wrapped tools
    /// exit 0 even when they found something. The flip side: a tool that
    /// prints an informational banner on success would be misreported as
    /// failed under this strategy — give such checks `ExitStatus`.
    #[default]
    Output,
    /// Trust the tool's exit code; output is captured for display only.
    ExitStatus,
}

/// One configured pairing of an external tool with file-matching rules
/// and invocation style. Immutable once the run starts; declaration order
/// is both execution and report order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckDefinition {
    /// Display grouping, e.g. the language or tooling family.
    pub category: String,
    /// Human-readable summary shown with the check's result.
    pub description: String,
    /// Name of the external executable to invoke.
    pub command: String,
    /// Argument template. The element `"{files}"` expands in place to the
    /// matched paths: all of them in batch mode, one at a time otherwise.
    /// Arguments are passed as an argv vector; no shell is involved, so
    /// paths with spaces or metacharacters cannot break the command.
    pub args: Vec<String>,
    /// A file is a candidate iff it matches at least one of these
    /// (anchored at the start of the path).
    pub match_patterns: Vec<String>,
    /// A file matching any of these is dropped even if included.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// True: one invocation with every matched file. False: one
    /// invocation per matched file.
    #[serde(default = "default_true")]
    pub batch: bool,
    /// List the matched filenames when the check fails. Presentation
    /// only; never affects pass/fail.
    #[serde(default)]
    pub show_filenames: bool,
    /// Shown when the tool is not installed.
    #[serde(default)]
    pub install_hint: Option<String>,
    #[serde(default)]
    pub classification: Classification,
    /// Kill the invocation and fail the check after this many seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read check config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse check config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("check '{description}' has an invalid pattern '{pattern}': {source}")]
    Pattern {
        description: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Load a JSON check list to run instead of the built-ins.
pub fn load_checks(path: &Path) -> Result<Vec<CheckDefinition>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// The built-in check list for PHP/JS/CSS/SCSS projects.
pub fn default_checks() -> Vec<CheckDefinition> {
    vec![
        CheckDefinition {
            category: "PHP".to_string(),
            description: "Looking for dump, die, dd, print_r statements...".to_string(),
            command: "grep".to_string(),
            // Trailing /dev/null keeps grep in multi-file mode so matches
            // are prefixed with their filename.
            args: args(&[
                "-n", "-e", "dump(", "-e", "die(", "-e", "dd(", "-e", "print_r(", "{files}",
                "/dev/null",
            ]),
            match_patterns: patterns(&[r".*\.php$"]),
            ignore_patterns: vec![],
            batch: true,
            show_filenames: true,
            install_hint: None,
            classification: Classification::Output,
            timeout_secs: None,
        },
        CheckDefinition {
            category: "PHP".to_string(),
            description: "Checking syntax...".to_string(),
            command: "phpcs".to_string(),
            args: args(&["--standard=PSR2", "{files}"]),
            match_patterns: patterns(&[r".*\.php$"]),
            ignore_patterns: vec![],
            batch: true,
            show_filenames: true,
            install_hint: Some("pear install PHP_CodeSniffer".to_string()),
            classification: Classification::Output,
            timeout_secs: None,
        },
        CheckDefinition {
            category: "JS".to_string(),
            description: "Looking for console.log() or debugger...".to_string(),
            command: "grep".to_string(),
            args: args(&["-n", "-e", "console.log", "-e", "debugger", "{files}"]),
            match_patterns: patterns(&[r".*\.js$"]),
            ignore_patterns: vec![],
            batch: true,
            show_filenames: true,
            install_hint: None,
            classification: Classification::Output,
            timeout_secs: None,
        },
        CheckDefinition {
            category: "JS".to_string(),
            description: "Running Jshint...".to_string(),
            command: "jshint".to_string(),
            args: args(&["{files}"]),
            match_patterns: patterns(&[r".*\.js$"]),
            ignore_patterns: vec![],
            batch: true,
            show_filenames: false,
            install_hint: Some("npm install -g jshint".to_string()),
            // jshint prints "Lint Free!" on success, which the output
            // strategy would count as a finding. Its exit code is
            // reliable, so trust that instead.
            classification: Classification::ExitStatus,
            timeout_secs: None,
        },
        CheckDefinition {
            category: "CSS/SASS".to_string(),
            description: "Running linter...".to_string(),
            command: "./node_modules/.bin/stylelint".to_string(),
            args: args(&["--formatter", "verbose", "--allow-empty-input", "{files}"]),
            match_patterns: patterns(&[r".*\.(s[ac]ss|css|html)$"]),
            ignore_patterns: vec![],
            batch: true,
            show_filenames: true,
            install_hint: Some("npm install stylelint".to_string()),
            classification: Classification::Output,
            timeout_secs: None,
        },
    ]
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn patterns(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checks_are_well_formed() {
        let checks = default_checks();
        assert_eq!(checks.len(), 5);
        for check in &checks {
            assert!(!check.match_patterns.is_empty());
            assert!(
                check.args.iter().any(|a| a == FILES_PLACEHOLDER),
                "check '{}' never receives its files",
                check.description
            );
        }
    }

    #[test]
    fn load_checks_applies_defaults_for_absent_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checks.json");
        fs::write(
            &path,
            r#"[{
                "category": "CSS",
                "description": "Looking for !important...",
                "command": "grep",
                "args": ["-n", "!important", "{files}"],
                "match_patterns": [".*\\.css$"]
            }]"#,
        )
        .unwrap();

        let checks = load_checks(&path).unwrap();
        assert_eq!(checks.len(), 1);
        let check = &checks[0];
        assert!(check.batch);
        assert!(!check.show_filenames);
        assert!(check.ignore_patterns.is_empty());
        assert!(check.install_hint.is_none());
        assert_eq!(check.classification, Classification::Output);
        assert_eq!(check.timeout_secs, None);
    }

    #[test]
    fn load_checks_parses_classification_and_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checks.json");
        fs::write(
            &path,
            r#"[{
                "category": "JS",
                "description": "Running Jshint...",
                "command": "jshint",
                "args": ["{files}"],
                "match_patterns": [".*\\.js$"],
                "batch": false,
                "classification": "exit-status",
                "timeout_secs": 30
            }]"#,
        )
        .unwrap();

        let checks = load_checks(&path).unwrap();
        assert_eq!(checks[0].classification, Classification::ExitStatus);
        assert_eq!(checks[0].timeout_secs, Some(30));
        assert!(!checks[0].batch);
    }

    #[test]
    fn load_checks_missing_file_is_a_read_error() {
        let err = load_checks(Path::new("/no/such/checks.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_checks_bad_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checks.json");
        fs::write(&path, "not json").unwrap();
        let err = load_checks(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
