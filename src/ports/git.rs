use crate::domain::{AppError, CloneUrl};
use std::path::Path;

/// Git operations a publish run needs against the catalog repository.
///
/// Every operation names the repository directory explicitly; none of them
/// relies on the process working directory.
pub trait GitPort {
    /// Clone `url` into `dest`, which must not exist yet.
    fn clone_repo(&self, url: &CloneUrl, dest: &Path) -> Result<(), AppError>;

    /// Set a key in the repository's local config.
    fn set_config(&self, repo: &Path, key: &str, value: &str) -> Result<(), AppError>;

    /// Porcelain working-tree status. Empty means a clean tree.
    fn status(&self, repo: &Path) -> Result<String, AppError>;

    /// Stage every change, including deletions.
    fn add_all(&self, repo: &Path) -> Result<(), AppError>;

    /// Commit the index with a message.
    fn commit(&self, repo: &Path, message: &str) -> Result<(), AppError>;

    /// Push the checked-out branch to `origin`.
    fn push(&self, repo: &Path) -> Result<(), AppError>;
}
