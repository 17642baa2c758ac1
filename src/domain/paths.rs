//! Fixed layout of template sources and of the catalog repository.

use std::path::{Path, PathBuf};

/// Directory, relative to the working directory, holding the template sources.
pub const BASE_DIR: &str = "rancher_base";
pub const COMPOSE_TEMPLATE: &str = "rancher_base/docker-compose.yml.tmpl";
pub const RANCHER_COMPOSE_TEMPLATE: &str = "rancher_base/rancher-compose.yml.tmpl";
pub const CONFIG_TEMPLATE: &str = "rancher_base/config.yml.tmpl";
pub const ICON: &str = "rancher_base/catalogIcon.png";

/// Directory inside the catalog repository holding all template entries.
pub const TEMPLATES_DIR: &str = "templates";

/// `<repo>/templates/<template_name>`, shared by every build of a template.
pub fn template_dir(repo_dir: &Path, template_name: &str) -> PathBuf {
    repo_dir.join(TEMPLATES_DIR).join(template_name)
}

/// `<repo>/templates/<template_name>/<build_number>`.
pub fn target_dir(repo_dir: &Path, template_name: &str, build_number: u64) -> PathBuf {
    template_dir(repo_dir, template_name).join(build_number.to_string())
}

/// Where a template is rendered to, relative to the per-build directory or
/// to the template directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    Build,
    Template,
}

/// One template source and the file it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderJob {
    pub source: &'static str,
    pub output: &'static str,
    pub scope: RenderScope,
}

impl RenderJob {
    pub fn source_path(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(self.source)
    }

    pub fn output_path(&self, repo_dir: &Path, template_name: &str, build_number: u64) -> PathBuf {
        match self.scope {
            RenderScope::Build => target_dir(repo_dir, template_name, build_number).join(self.output),
            RenderScope::Template => template_dir(repo_dir, template_name).join(self.output),
        }
    }
}

/// The templates rendered on every run, in order.
pub const RENDER_JOBS: [RenderJob; 3] = [
    RenderJob { source: COMPOSE_TEMPLATE, output: "docker-compose.yml", scope: RenderScope::Build },
    RenderJob {
        source: RANCHER_COMPOSE_TEMPLATE,
        output: "rancher-compose.yml",
        scope: RenderScope::Build,
    },
    RenderJob { source: CONFIG_TEMPLATE, output: "config.yml", scope: RenderScope::Template },
];

/// Commit message recorded for a build.
pub fn commit_message(template_name: &str, build_number: u64) -> String {
    format!("Update {} catalog entry for build #{}", template_name, build_number)
}
