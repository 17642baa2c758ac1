//! Build metadata and the execution context handed to template rendering.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::credentials::AccessToken;

/// Source repository being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    pub owner: String,
    pub name: String,
    pub link: String,
    pub avatar: String,
    pub branch: String,
    pub private: bool,
    pub trusted: bool,
}

/// Build that triggered the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub number: u64,
    pub event: String,
    pub status: String,
    pub deploy: String,
    pub created: i64,
    pub started: i64,
    pub finished: i64,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Commit being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub remote: String,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub link: String,
    pub branch: String,
    pub message: String,
    pub author: Author,
}

/// Plugin settings. The token is skipped when serializing so it never
/// reaches a rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub catalog_repo: String,
    #[serde(skip)]
    pub token: AccessToken,
    pub username: String,
    pub email: String,
    pub template_name: String,
    pub template_version: String,
    pub remote_base: String,
}

/// Everything a run knows about itself.
///
/// `repo_dir` is the only field written after construction, once the
/// catalog has been cloned.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionContext {
    pub repo: RepositoryInfo,
    pub build: BuildInfo,
    pub commit: CommitInfo,
    pub config: Configuration,
    pub work_dir: PathBuf,
    pub repo_dir: Option<PathBuf>,
    pub template_name: String,
    pub template_version: String,
}

impl ExecutionContext {
    pub fn new(
        repo: RepositoryInfo,
        build: BuildInfo,
        commit: CommitInfo,
        config: Configuration,
        work_dir: PathBuf,
    ) -> Self {
        let template_name = config.template_name.clone();
        let template_version = config.template_version.clone();
        Self {
            repo,
            build,
            commit,
            config,
            work_dir,
            repo_dir: None,
            template_name,
            template_version,
        }
    }

    /// Record where the catalog was cloned.
    pub fn set_repo_dir(&mut self, repo_dir: PathBuf) {
        self.repo_dir = Some(repo_dir);
    }

    pub fn repo_dir(&self) -> Option<&Path> {
        self.repo_dir.as_deref()
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}
