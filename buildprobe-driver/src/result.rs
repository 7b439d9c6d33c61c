use chrono::{DateTime, Utc};

/// Outcome of one tool invocation. Immutable once produced.
///
/// Captured streams are `None` when capture was not requested, which the
/// predicates treat as "contains nothing".
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Exit code, absent when the process died to a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl ProcessResult {
    /// True when the tool ran and reported success (exit code 0).
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn stdout_contains(&self, needle: &str) -> bool {
        self.stdout.as_deref().is_some_and(|s| s.contains(needle))
    }

    /// True when captured stdout does not contain `needle`. Uncaptured
    /// stdout lacks everything.
    pub fn stdout_lacks(&self, needle: &str) -> bool {
        !self.stdout_contains(needle)
    }

    pub fn stderr_contains(&self, needle: &str) -> bool {
        self.stderr.as_deref().is_some_and(|s| s.contains(needle))
    }

    pub fn stderr_lacks(&self, needle: &str) -> bool {
        !self.stderr_contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessResult;
    use chrono::Utc;

    fn result(stdout: Option<&str>) -> ProcessResult {
        let now = Utc::now();
        ProcessResult {
            exit_code: Some(0),
            success: true,
            stdout: stdout.map(str::to_string),
            stderr: None,
            started_at: now,
            ended_at: now,
        }
    }

    #[test]
    fn contains_matches_substring() {
        let r = result(Some("warning MSB3243: conflict"));
        assert!(r.stdout_contains("MSB3243"));
        assert!(!r.stdout_lacks("warning"));
    }

    #[test]
    fn uncaptured_stdout_contains_nothing() {
        let r = result(None);
        assert!(!r.stdout_contains("anything"));
        assert!(r.stdout_lacks("anything"));
    }

    #[test]
    fn stderr_predicates_mirror_stdout() {
        let mut r = result(None);
        r.stderr = Some("error CS1002".to_string());
        assert!(r.stderr_contains("CS1002"));
        assert!(r.stderr_lacks("CS9999"));
    }
}
