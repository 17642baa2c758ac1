//! Clone the catalog, render the entry for one build, publish if anything changed.
//!
//! Steps run strictly in order. The first failing step aborts the run and
//! its error is returned unchanged; nothing is cleaned up, the scratch
//! directory is left for the environment to reclaim.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::icon_assets;
use crate::app::AppContext;
use crate::domain::paths::{self, ICON, RENDER_JOBS};
use crate::domain::{AppError, CloneUrl, Configuration, ExecutionContext};
use crate::ports::{GitPort, TemplateRenderer};

const SCRATCH_PREFIX: &str = "rancher-catalog-";
const CLONE_DIR: &str = "catalog";

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Absolute path of the cloned catalog.
    pub repo_dir: PathBuf,
    /// `templates/<name>/<build>` inside the clone.
    pub target_dir: PathBuf,
    /// Rendered files, in render order.
    pub rendered: Vec<PathBuf>,
    /// Icon file names copied into the target directory.
    pub icons: Vec<String>,
    /// Whether a commit was pushed.
    pub published: bool,
}

/// Run the pipeline, cloning into a fresh temporary directory.
pub fn execute<G: GitPort, R: TemplateRenderer>(
    ctx: &AppContext<G, R>,
    exec: &mut ExecutionContext,
) -> Result<PublishOutcome, AppError> {
    let scratch = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?.keep();
    run_in(ctx, exec, &scratch)
}

/// Run the pipeline, cloning into `<scratch>/catalog`.
pub fn run_in<G: GitPort, R: TemplateRenderer>(
    ctx: &AppContext<G, R>,
    exec: &mut ExecutionContext,
    scratch: &Path,
) -> Result<PublishOutcome, AppError> {
    tracing::info!(build = exec.build.number, template = %exec.template_name, "publishing catalog entry");
    let repo_dir = acquire_repository(ctx.git(), &exec.config, scratch)?;
    exec.set_repo_dir(repo_dir.clone());
    println!("✅ Cloned {} into {}", exec.config.catalog_repo, repo_dir.display());

    configure_identity(ctx.git(), &repo_dir, &exec.config)?;
    tracing::info!(email = %exec.config.email, "configured committer identity");

    let target_dir = prepare_target_dir(&repo_dir, &exec.template_name, exec.build.number)?;
    println!("✅ Prepared {}", target_dir.display());

    let rendered = render_templates(ctx.renderer(), exec, &repo_dir)?;
    tracing::info!(count = rendered.len(), "rendered templates");
    for path in &rendered {
        println!("✅ Rendered {}", path.display());
    }

    let icons = icon_assets::copy_variants(&exec.work_dir().join(ICON), &target_dir)?;
    tracing::info!(count = icons.len(), "copied icon variants");
    println!("✅ Copied {}", icons.join(", "));

    let changed = detect_change(ctx.git(), &repo_dir)?;
    tracing::info!(changed, "checked catalog status");

    let published = if changed {
        let message = paths::commit_message(&exec.template_name, exec.build.number);
        publish_changes(ctx.git(), &repo_dir, &message)?;
        println!("✅ Published build #{} to {}", exec.build.number, exec.config.catalog_repo);
        true
    } else {
        println!("No files changed; nothing to publish for build #{}", exec.build.number);
        false
    };

    Ok(PublishOutcome { repo_dir, target_dir, rendered, icons, published })
}

/// Clone the catalog into `<scratch>/catalog` and return its absolute path.
pub fn acquire_repository(
    git: &impl GitPort,
    config: &Configuration,
    scratch: &Path,
) -> Result<PathBuf, AppError> {
    let url = CloneUrl::authenticated(&config.remote_base, &config.catalog_repo, &config.token)?;
    let dest = std::path::absolute(scratch.join(CLONE_DIR))?;
    tracing::debug!(url = %url, dest = %dest.display(), "cloning catalog");
    git.clone_repo(&url, &dest)?;
    Ok(dest)
}

/// Committer email and name in the clone's local config.
pub fn configure_identity(
    git: &impl GitPort,
    repo_dir: &Path,
    config: &Configuration,
) -> Result<(), AppError> {
    git.set_config(repo_dir, "user.email", &config.email)?;
    git.set_config(repo_dir, "user.name", &config.username)?;
    Ok(())
}

/// Create `templates/<name>/<build>`. Succeeds if it already exists.
pub fn prepare_target_dir(
    repo_dir: &Path,
    template_name: &str,
    build_number: u64,
) -> Result<PathBuf, AppError> {
    let target = paths::target_dir(repo_dir, template_name, build_number);
    fs::create_dir_all(&target)?;
    Ok(target)
}

/// Render every template from the working directory into the clone.
///
/// Templates are rendered fully before anything is written for them, and
/// existing files are overwritten.
pub fn render_templates(
    renderer: &impl TemplateRenderer,
    exec: &ExecutionContext,
    repo_dir: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::with_capacity(RENDER_JOBS.len());
    for job in RENDER_JOBS.iter() {
        let source = job.source_path(exec.work_dir());
        let output = job.output_path(repo_dir, &exec.template_name, exec.build.number);

        let content = renderer.render(&source, exec)?;
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output, content)?;
        tracing::debug!(source = %source.display(), output = %output.display(), "rendered template");
        written.push(output);
    }
    Ok(written)
}

/// True when the working tree has uncommitted changes.
pub fn detect_change(git: &impl GitPort, repo_dir: &Path) -> Result<bool, AppError> {
    let status = git.status(repo_dir)?;
    Ok(!status.trim().is_empty())
}

/// Stage, commit and push. Each runs exactly once.
pub fn publish_changes(git: &impl GitPort, repo_dir: &Path, message: &str) -> Result<(), AppError> {
    git.add_all(repo_dir)?;
    git.commit(repo_dir, message)?;
    git.push(repo_dir)?;
    Ok(())
}
