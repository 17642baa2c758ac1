//! rancher-catalog: publish a rendered Rancher catalog entry for a build to a git catalog repository.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::{GitCommandAdapter, MinijinjaTemplateRenderer};
use app::{AppContext, commands::publish};
use ports::GitPort;

pub use app::commands::publish::PublishOutcome;
pub use app::config::{ConfigOverrides, DEFAULT_REMOTE_BASE};
pub use domain::{
    AccessToken, AppError, Author, BuildInfo, CommitInfo, Configuration, ExecutionContext,
    Redactor, RepositoryInfo,
};

/// Publish the catalog entry described by `context`.
///
/// Clones the catalog into a fresh temporary directory, renders the
/// templates found under `<work_dir>/rancher_base`, and commits and pushes
/// only when the working tree changed.
pub fn publish(context: ExecutionContext) -> Result<PublishOutcome, AppError> {
    let git = GitCommandAdapter::new(Redactor::new(&context.config.token));
    publish_with_git(context, git)
}

/// Same as [`publish`] with a caller-provided git implementation.
pub fn publish_with_git<G: GitPort>(
    mut context: ExecutionContext,
    git: G,
) -> Result<PublishOutcome, AppError> {
    let ctx = AppContext::new(git, MinijinjaTemplateRenderer::new());
    publish::execute(&ctx, &mut context)
}
