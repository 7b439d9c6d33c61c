use crate::result::ProcessResult;
use camino::Utf8PathBuf;
use chrono::Utc;
use std::collections::BTreeMap;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// The tool could not be run at all. Distinct from a non-zero exit, which
/// is a normal [`ProcessResult`].
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {tool}: {message}")]
    Spawn { tool: Utf8PathBuf, message: String },

    #[error("failed to collect output of {tool}: {message}")]
    Collect { tool: Utf8PathBuf, message: String },
}

/// Builder for one blocking invocation of an external tool.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    tool: Utf8PathBuf,
    working_dir: Utf8PathBuf,
    args: Vec<String>,
    envs: BTreeMap<String, String>,
    capture_stdout: bool,
    capture_stderr: bool,
}

impl ToolCommand {
    pub fn new(tool: impl Into<Utf8PathBuf>, working_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            working_dir: working_dir.into(),
            args: Vec::new(),
            envs: BTreeMap::new(),
            capture_stdout: false,
            capture_stderr: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(name.into(), value.into());
        self
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    pub fn capture_stderr(mut self) -> Self {
        self.capture_stderr = true;
        self
    }

    /// Runs the tool and blocks until it exits.
    ///
    /// Uncaptured streams are inherited from the calling process and left
    /// out of the result.
    pub fn execute(&self) -> Result<ProcessResult, LaunchError> {
        debug!(
            tool = %self.tool,
            working_dir = %self.working_dir,
            args = ?self.args,
            "invoking tool"
        );

        let mut cmd = Command::new(&self.tool);
        cmd.args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(if self.capture_stdout {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .stderr(if self.capture_stderr {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });
        for (name, value) in &self.envs {
            cmd.env(name, value);
        }

        let started_at = Utc::now();
        let child = cmd.spawn().map_err(|e| LaunchError::Spawn {
            tool: self.tool.clone(),
            message: e.to_string(),
        })?;
        let output = child.wait_with_output().map_err(|e| LaunchError::Collect {
            tool: self.tool.clone(),
            message: e.to_string(),
        })?;
        let ended_at = Utc::now();

        debug!(tool = %self.tool, code = ?output.status.code(), "tool exited");

        Ok(ProcessResult {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: self
                .capture_stdout
                .then(|| String::from_utf8_lossy(&output.stdout).into_owned()),
            stderr: self
                .capture_stderr
                .then(|| String::from_utf8_lossy(&output.stderr).into_owned()),
            started_at,
            ended_at,
        })
    }
}
