use crate::domain::{AppError, CloneUrl, Redactor};
use crate::ports::GitPort;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// How much of git's output may end up in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Diagnostics {
    /// Redacted stderr.
    Redacted,
    /// Exit status only.
    StatusOnly,
}

/// Runs the `git` executable, one process per operation.
#[derive(Debug, Clone)]
pub struct GitCommandAdapter {
    program: OsString,
    redactor: Redactor,
}

impl GitCommandAdapter {
    pub fn new(redactor: Redactor) -> Self {
        Self { program: OsString::from("git"), redactor }
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program<P: Into<OsString>>(mut self, program: P) -> Self {
        self.program = program.into();
        self
    }

    fn label(&self, args: &[&str]) -> String {
        self.redactor.redact(&format!("git {}", args.join(" ")))
    }

    fn output(&self, cwd: &Path, args: &[&str]) -> Result<Output, AppError> {
        let label = self.label(args);
        tracing::debug!(command = %label, cwd = %cwd.display(), "running git");

        Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| AppError::Git { command: label, details: self.redactor.redact(&e.to_string()) })
    }

    fn run(&self, cwd: &Path, args: &[&str], diagnostics: Diagnostics) -> Result<String, AppError> {
        let output = self.output(cwd, args)?;

        if !output.status.success() {
            let details = match diagnostics {
                Diagnostics::Redacted => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    if stderr.is_empty() {
                        output.status.to_string()
                    } else {
                        self.redactor.redact(&stderr)
                    }
                }
                Diagnostics::StatusOnly => output.status.to_string(),
            };
            return Err(AppError::Git { command: self.label(args), details });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitPort for GitCommandAdapter {
    fn clone_repo(&self, url: &CloneUrl, dest: &Path) -> Result<(), AppError> {
        let parent = dest.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let dest_str = dest.to_string_lossy();
        self.run(&parent, &["clone", "--quiet", url.expose(), dest_str.as_ref()], Diagnostics::Redacted)?;
        Ok(())
    }

    fn set_config(&self, repo: &Path, key: &str, value: &str) -> Result<(), AppError> {
        self.run(repo, &["config", "--local", key, value], Diagnostics::Redacted)?;
        Ok(())
    }

    fn status(&self, repo: &Path) -> Result<String, AppError> {
        self.run(repo, &["status", "--porcelain"], Diagnostics::Redacted)
    }

    fn add_all(&self, repo: &Path) -> Result<(), AppError> {
        self.run(repo, &["add", "--all"], Diagnostics::Redacted)?;
        Ok(())
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<(), AppError> {
        self.run(repo, &["commit", "--quiet", "-m", message], Diagnostics::StatusOnly)?;
        Ok(())
    }

    fn push(&self, repo: &Path) -> Result<(), AppError> {
        let output = self.output(repo, &["push", "--quiet", "origin", "HEAD"])?;
        if !output.status.success() {
            return Err(AppError::PushFailed { status: output.status.to_string() });
        }
        Ok(())
    }
}
