//! Version-control queries.
//!
//! All history comes from the `git` command line. Output is trusted as-is;
//! the only validation is exit status, UTF-8, and non-empty where a value is
//! required.

use crate::error::HeaderError;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Read-only view of a file's history and working-tree state.
pub trait History {
    /// Author names of every commit touching `path`, one entry per commit.
    /// May contain duplicates and empty entries.
    fn authors(&self, path: &Path) -> Result<Vec<String>, HeaderError>;

    /// ISO date (`YYYY-MM-DD`) of the most recent commit touching `path`.
    fn last_commit_date(&self, path: &Path) -> Result<String, HeaderError>;

    /// True if `path` has uncommitted changes or is untracked.
    fn is_dirty(&self, path: &Path) -> Result<bool, HeaderError>;

    /// Configured user name of whoever is committing.
    fn user_name(&self) -> Result<String, HeaderError>;
}

/// [`History`] backed by the `git` executable.
///
/// The user name is looked up at most once per `Git` value.
#[derive(Debug)]
pub struct Git {
    program: PathBuf,
    user_name: OnceCell<String>,
}

impl Git {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            user_name: OnceCell::new(),
        }
    }

    fn command(&self, args: &[&str], path: Option<&Path>) -> (Command, String) {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let mut shown = format!("{} {}", self.program.display(), args.join(" "));
        if let Some(path) = path {
            cmd.arg("--").arg(path);
            shown.push_str(&format!(" -- {}", path.display()));
        }
        (cmd, shown)
    }

    fn run(&self, args: &[&str], path: Option<&Path>) -> Result<(Output, String), HeaderError> {
        let (mut cmd, shown) = self.command(args, path);
        debug!(command = %shown, "running git");
        let output = cmd.output().map_err(|source| HeaderError::Spawn {
            command: shown.clone(),
            source,
        })?;
        Ok((output, shown))
    }

    /// Run a query that must succeed and return its stdout.
    fn query(&self, args: &[&str], path: Option<&Path>) -> Result<(String, String), HeaderError> {
        let (output, shown) = self.run(args, path)?;
        if !output.status.success() {
            return Err(HeaderError::Command {
                command: shown,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match String::from_utf8(output.stdout) {
            Ok(stdout) => Ok((stdout, shown)),
            Err(_) => Err(HeaderError::UnexpectedOutput {
                command: shown,
                detail: "output is not valid UTF-8".to_string(),
            }),
        }
    }

    /// Run a check whose answer is its exit status.
    fn succeeds(&self, args: &[&str], path: &Path) -> Result<bool, HeaderError> {
        let (output, _) = self.run(args, Some(path))?;
        Ok(output.status.success())
    }
}

/// Trimmed output, or an error if nothing came back.
fn required(stdout: &str, shown: String) -> Result<String, HeaderError> {
    let value = stdout.trim();
    if value.is_empty() {
        return Err(HeaderError::UnexpectedOutput {
            command: shown,
            detail: "empty output".to_string(),
        });
    }
    Ok(value.to_string())
}

impl History for Git {
    fn authors(&self, path: &Path) -> Result<Vec<String>, HeaderError> {
        let (stdout, _) = self.query(&["log", "--format=%aN"], Some(path))?;
        Ok(stdout.split('\n').map(str::to_string).collect())
    }

    fn last_commit_date(&self, path: &Path) -> Result<String, HeaderError> {
        let (stdout, shown) = self.query(&["log", "--format=%as", "-1"], Some(path))?;
        required(&stdout, shown)
    }

    fn is_dirty(&self, path: &Path) -> Result<bool, HeaderError> {
        // Any non-zero status counts, including a repository with no HEAD yet.
        if !self.succeeds(&["diff-index", "--quiet", "HEAD"], path)? {
            return Ok(true);
        }
        let tracked = self.succeeds(&["ls-files", "--error-unmatch"], path)?;
        Ok(!tracked)
    }

    fn user_name(&self) -> Result<String, HeaderError> {
        if let Some(name) = self.user_name.get() {
            return Ok(name.clone());
        }
        let (stdout, shown) = self.query(&["config", "user.name"], None)?;
        let name = required(&stdout, shown)?;
        debug!(user = %name, "resolved git user");
        Ok(self.user_name.get_or_init(|| name).clone())
    }
}
