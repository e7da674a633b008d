use regex::Regex;

use crate::config::{CheckDefinition, ConfigError};

/// Compiled include/ignore patterns for one check. Matching is
/// check-local: each check filters the shared candidate list on its own.
#[derive(Debug)]
pub struct PathFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PathFilter {
    pub fn for_check(check: &CheckDefinition) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_all(&check.match_patterns, check)?,
            exclude: compile_all(&check.ignore_patterns, check)?,
        })
    }

    /// True iff `path` matches at least one include pattern and no
    /// exclude pattern. Existential in both directions, so pattern order
    /// never changes the answer.
    pub fn matches(&self, path: &str) -> bool {
        self.include.iter().any(|re| re.is_match(path))
            && !self.exclude.iter().any(|re| re.is_match(path))
    }

    pub fn filter(&self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .filter(|path| self.matches(path))
            .cloned()
            .collect()
    }
}

fn compile_all(patterns: &[String], check: &CheckDefinition) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            // Anchor at the start of the path; a pattern pins the end
            // itself with `$` when it wants to.
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| ConfigError::Pattern {
                description: check.description.clone(),
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
