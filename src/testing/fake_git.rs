use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AppError, CloneUrl};
use crate::ports::GitPort;

/// A git invocation recorded by [`FakeGit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Clone { url: String, dest: PathBuf },
    Config { key: String, value: String },
    Status,
    Add,
    Commit { message: String },
    Push,
}

/// Records calls instead of running git. `clone_repo` creates the
/// destination directory so later steps have somewhere to write.
#[derive(Default)]
pub struct FakeGit {
    pub calls: Mutex<Vec<GitCall>>,
    pub status_output: Mutex<String>,
    pub fail_clone: bool,
    pub fail_push: bool,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a dirty working tree from `status`.
    pub fn with_changes(self) -> Self {
        *self.status_output.lock().unwrap() = "?? templates/".to_string();
        self
    }

    pub fn failing_clone(mut self) -> Self {
        self.fail_clone = true;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitPort for FakeGit {
    fn clone_repo(&self, url: &CloneUrl, dest: &Path) -> Result<(), AppError> {
        self.record(GitCall::Clone { url: url.to_string(), dest: dest.to_path_buf() });
        if self.fail_clone {
            return Err(AppError::Git {
                command: format!("git clone {}", url),
                details: "repository not found".into(),
            });
        }
        fs::create_dir_all(dest)?;
        Ok(())
    }

    fn set_config(&self, _repo: &Path, key: &str, value: &str) -> Result<(), AppError> {
        self.record(GitCall::Config { key: key.into(), value: value.into() });
        Ok(())
    }

    fn status(&self, _repo: &Path) -> Result<String, AppError> {
        self.record(GitCall::Status);
        Ok(self.status_output.lock().unwrap().clone())
    }

    fn add_all(&self, _repo: &Path) -> Result<(), AppError> {
        self.record(GitCall::Add);
        Ok(())
    }

    fn commit(&self, _repo: &Path, message: &str) -> Result<(), AppError> {
        self.record(GitCall::Commit { message: message.into() });
        Ok(())
    }

    fn push(&self, _repo: &Path) -> Result<(), AppError> {
        self.record(GitCall::Push);
        if self.fail_push {
            return Err(AppError::PushFailed { status: "exit status: 128".into() });
        }
        Ok(())
    }
}
