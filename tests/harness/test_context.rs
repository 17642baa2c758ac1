//! Shared testing harness for `rancher-catalog` integration tests.

use assert_cmd::Command;
use rancher_catalog::{
    AccessToken, Author, BuildInfo, CommitInfo, Configuration, ExecutionContext, RepositoryInfo,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

use super::git_repository;

pub(crate) const TOKEN: &str = "ghp_testtoken123";
pub(crate) const CATALOG_REPO: &str = "acme/catalog";

pub(crate) const COMPOSE_TEMPLATE: &str = "\
web:
  image: {{ repo.owner }}/{{ repo.name }}:{{ commit.sha[:7] }}
  labels:
    io.rancher.build: \"{{ build.number }}\"
";
pub(crate) const RANCHER_COMPOSE_TEMPLATE: &str = "\
.catalog:
  name: {{ template_name }}
  version: {{ template_version }}
web:
  scale: 1
";
pub(crate) const CONFIG_TEMPLATE: &str = "\
name: {{ template_name }}
description: {{ repo.owner }}/{{ repo.name }} on {{ commit.branch }}
version: {{ template_version }}
";

/// Isolated environment: a working directory holding `rancher_base/` and a
/// bare catalog remote reachable through a `file://` base URL.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    mirrors: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let mirrors = root.path().join("mirrors");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let ctx = Self { root, work_dir, mirrors };
        git_repository::init_seeded_bare_repo(ctx.root.path(), &ctx.bare_repo());
        ctx.write_templates();
        ctx
    }

    fn write_templates(&self) {
        let base = self.work_dir.join("rancher_base");
        fs::create_dir_all(&base).expect("Failed to create rancher_base");
        fs::write(base.join("docker-compose.yml.tmpl"), COMPOSE_TEMPLATE).unwrap();
        fs::write(base.join("rancher-compose.yml.tmpl"), RANCHER_COMPOSE_TEMPLATE).unwrap();
        fs::write(base.join("config.yml.tmpl"), CONFIG_TEMPLATE).unwrap();
        fs::write(base.join("catalogIcon.png"), b"\x89PNG fake").unwrap();
        fs::write(base.join("catalogIcon.ico"), b"ICO fake").unwrap();
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory holding `rancher_base/`.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path to the bare catalog repository.
    pub(crate) fn bare_repo(&self) -> PathBuf {
        self.mirrors.join("acme").join("catalog.git")
    }

    /// `file://` URL the catalog repository lives under.
    pub(crate) fn remote_base(&self) -> String {
        Url::from_directory_path(&self.mirrors).expect("mirrors path is absolute").to_string()
    }

    /// Execution context for a build of `template_name`.
    pub(crate) fn execution_context(&self, template_name: &str, build_number: u64) -> ExecutionContext {
        let repo = RepositoryInfo {
            owner: "acme".into(),
            name: "webapp".into(),
            link: "https://github.com/acme/webapp".into(),
            branch: "main".into(),
            ..Default::default()
        };
        let build = BuildInfo {
            number: build_number,
            event: "push".into(),
            status: "success".into(),
            ..Default::default()
        };
        let commit = CommitInfo {
            sha: "a1b2c3d4e5f6a7b8".into(),
            branch: "main".into(),
            message: "Ship it".into(),
            author: Author { name: "Dev".into(), email: "dev@example.com".into(), ..Default::default() },
            ..Default::default()
        };
        let config = Configuration {
            catalog_repo: CATALOG_REPO.into(),
            token: AccessToken::new(TOKEN),
            username: "catalog-bot".into(),
            email: "catalog-bot@example.com".into(),
            template_name: template_name.into(),
            template_version: "1.0.0".into(),
            remote_base: self.remote_base(),
        };
        ExecutionContext::new(repo, build, commit, config, self.work_dir.clone())
    }

    /// Build a command for invoking the compiled binary with the plugin
    /// environment a build platform would provide.
    pub(crate) fn cli(&self, template_name: &str, build_number: u64) -> Command {
        let mut cmd = self.bare_cli();
        cmd.env("DRONE_REPO_OWNER", "acme")
            .env("DRONE_REPO_NAME", "webapp")
            .env("DRONE_BUILD_NUMBER", build_number.to_string())
            .env("DRONE_COMMIT_SHA", "a1b2c3d4e5f6a7b8")
            .env("DRONE_COMMIT_BRANCH", "main")
            .env("PLUGIN_CATALOG_REPO", CATALOG_REPO)
            .env("PLUGIN_GITHUB_TOKEN", TOKEN)
            .env("PLUGIN_GITHUB_USER", "catalog-bot")
            .env("PLUGIN_GITHUB_EMAIL", "catalog-bot@example.com")
            .env("PLUGIN_TEMPLATE_NAME", template_name)
            .env("PLUGIN_TEMPLATE_VERSION", "1.0.0")
            .env("PLUGIN_REMOTE_BASE", self.remote_base());
        cmd
    }

    /// Command with no plugin settings at all.
    pub(crate) fn bare_cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("rancher-catalog").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env_remove("RUST_LOG");
        for (key, _) in std::env::vars() {
            if key.starts_with("DRONE_") || key.starts_with("PLUGIN_") {
                cmd.env_remove(key);
            }
        }
        cmd
    }

    /// Commit subjects on the catalog remote, newest first.
    pub(crate) fn remote_subjects(&self) -> Vec<String> {
        git_repository::log_subjects(&self.bare_repo())
    }

    /// File content at the remote's HEAD.
    pub(crate) fn remote_file(&self, path: &str) -> Option<String> {
        git_repository::show_file(&self.bare_repo(), path)
    }
}
