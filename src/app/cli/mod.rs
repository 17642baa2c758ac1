//! CLI Adapter.
//!
//! Every flag can also be supplied through the environment variables a
//! build platform sets for its plugins (`DRONE_*` for build metadata,
//! `PLUGIN_*` for settings).

use std::env;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::adapters::{GitCommandAdapter, MinijinjaTemplateRenderer};
use crate::app::config::{self, ConfigOverrides};
use crate::app::logging::{self, LogLevel};
use crate::app::{AppContext, commands::publish};
use crate::domain::{
    AccessToken, AppError, Author, BuildInfo, CommitInfo, ExecutionContext, Redactor,
    RepositoryInfo,
};

#[derive(Parser)]
#[command(name = "rancher-catalog")]
#[command(version)]
#[command(
    about = "Render a Rancher catalog entry for this build and push it to the catalog repository",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    repo: RepoArgs,
    #[command(flatten)]
    build: BuildArgs,
    #[command(flatten)]
    commit: CommitArgs,
    #[command(flatten)]
    plugin: PluginArgs,
    /// Log verbosity for diagnostics on stderr
    #[arg(long, value_enum, default_value_t, env = "PLUGIN_LOG_LEVEL")]
    log_level: LogLevel,
}

#[derive(Args)]
#[command(next_help_heading = "Repository")]
struct RepoArgs {
    #[arg(long, env = "DRONE_REPO_OWNER", default_value = "")]
    repo_owner: String,
    #[arg(long, env = "DRONE_REPO_NAME", default_value = "")]
    repo_name: String,
    #[arg(long, env = "DRONE_REPO_LINK", default_value = "")]
    repo_link: String,
    #[arg(long, env = "DRONE_REPO_AVATAR", default_value = "")]
    repo_avatar: String,
    #[arg(long, env = "DRONE_REPO_BRANCH", default_value = "")]
    repo_branch: String,
    #[arg(long, env = "DRONE_REPO_PRIVATE", value_parser = BoolishValueParser::new())]
    repo_private: bool,
    #[arg(long, env = "DRONE_REPO_TRUSTED", value_parser = BoolishValueParser::new())]
    repo_trusted: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Build")]
struct BuildArgs {
    /// Build number; names the entry directory
    #[arg(long, env = "DRONE_BUILD_NUMBER")]
    build_number: u64,
    #[arg(long, env = "DRONE_BUILD_EVENT", default_value = "")]
    build_event: String,
    #[arg(long, env = "DRONE_BUILD_STATUS", default_value = "")]
    build_status: String,
    #[arg(long, env = "DRONE_DEPLOY_TO", default_value = "")]
    build_deploy: String,
    #[arg(long, env = "DRONE_BUILD_CREATED", default_value_t = 0)]
    build_created: i64,
    #[arg(long, env = "DRONE_BUILD_STARTED", default_value_t = 0)]
    build_started: i64,
    #[arg(long, env = "DRONE_BUILD_FINISHED", default_value_t = 0)]
    build_finished: i64,
    #[arg(long, env = "DRONE_BUILD_LINK", default_value = "")]
    build_link: String,
}

#[derive(Args)]
#[command(next_help_heading = "Commit")]
struct CommitArgs {
    #[arg(long, env = "DRONE_REMOTE_URL", default_value = "")]
    commit_remote: String,
    #[arg(long, env = "DRONE_COMMIT_SHA", default_value = "")]
    commit_sha: String,
    #[arg(long, env = "DRONE_COMMIT_REF", default_value = "")]
    commit_ref: String,
    #[arg(long, env = "DRONE_COMMIT_LINK", default_value = "")]
    commit_link: String,
    #[arg(long, env = "DRONE_COMMIT_BRANCH", default_value = "")]
    commit_branch: String,
    #[arg(long, env = "DRONE_COMMIT_MESSAGE", default_value = "")]
    commit_message: String,
    #[arg(long, env = "DRONE_COMMIT_AUTHOR", default_value = "")]
    commit_author: String,
    #[arg(long, env = "DRONE_COMMIT_AUTHOR_EMAIL", default_value = "")]
    commit_author_email: String,
    #[arg(long, env = "DRONE_COMMIT_AUTHOR_AVATAR", default_value = "")]
    commit_author_avatar: String,
}

#[derive(Args)]
#[command(next_help_heading = "Plugin")]
struct PluginArgs {
    /// Catalog repository as owner/name
    #[arg(long, env = "PLUGIN_CATALOG_REPO")]
    catalog_repo: Option<String>,
    /// Access token used to clone and push
    #[arg(long, env = "PLUGIN_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
    /// Committer name
    #[arg(long, env = "PLUGIN_GITHUB_USER")]
    github_user: Option<String>,
    /// Committer email
    #[arg(long, env = "PLUGIN_GITHUB_EMAIL")]
    github_email: Option<String>,
    /// Catalog template name
    #[arg(long, env = "PLUGIN_TEMPLATE_NAME")]
    template_name: Option<String>,
    /// Catalog template version
    #[arg(long, env = "PLUGIN_TEMPLATE_VERSION")]
    template_version: Option<String>,
    /// Base URL the catalog repository lives under (default: https://github.com)
    #[arg(long, env = "PLUGIN_REMOTE_BASE")]
    remote_base: Option<String>,
    /// TOML file with a [catalog] table supplying defaults
    #[arg(long, env = "PLUGIN_CONFIG")]
    config: Option<PathBuf>,
    /// Directory holding rancher_base/ (default: current directory)
    #[arg(long, env = "PLUGIN_WORK_DIR")]
    work_dir: Option<PathBuf>,
    /// Git executable to run
    #[arg(long, env = "PLUGIN_GIT_BINARY", default_value = "git")]
    git_binary: PathBuf,
}

impl From<RepoArgs> for RepositoryInfo {
    fn from(args: RepoArgs) -> Self {
        RepositoryInfo {
            owner: args.repo_owner,
            name: args.repo_name,
            link: args.repo_link,
            avatar: args.repo_avatar,
            branch: args.repo_branch,
            private: args.repo_private,
            trusted: args.repo_trusted,
        }
    }
}

impl From<BuildArgs> for BuildInfo {
    fn from(args: BuildArgs) -> Self {
        BuildInfo {
            number: args.build_number,
            event: args.build_event,
            status: args.build_status,
            deploy: args.build_deploy,
            created: args.build_created,
            started: args.build_started,
            finished: args.build_finished,
            link: args.build_link,
        }
    }
}

impl From<CommitArgs> for CommitInfo {
    fn from(args: CommitArgs) -> Self {
        CommitInfo {
            remote: args.commit_remote,
            sha: args.commit_sha,
            git_ref: args.commit_ref,
            link: args.commit_link,
            branch: args.commit_branch,
            message: args.commit_message,
            author: Author {
                name: args.commit_author,
                email: args.commit_author_email,
                avatar: args.commit_author_avatar,
            },
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let message = e.to_string();
                let message = message.strip_prefix("error: ").unwrap_or(&message);
                eprintln!("ERROR: {}", message.trim_end());
                std::process::exit(1);
            }
        },
    };
    logging::init(cli.log_level);

    if let Err(e) = run_publish(cli) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_publish(cli: Cli) -> Result<publish::PublishOutcome, AppError> {
    let plugin = cli.plugin;

    let file = plugin.config.as_deref().map(config::load_config_file).transpose()?;
    let overrides = ConfigOverrides {
        catalog_repo: plugin.catalog_repo,
        token: plugin.github_token.map(AccessToken::new),
        username: plugin.github_user,
        email: plugin.github_email,
        template_name: plugin.template_name,
        template_version: plugin.template_version,
        remote_base: plugin.remote_base,
    };
    let configuration = config::resolve(overrides, file)?;

    let work_dir = match plugin.work_dir {
        Some(dir) => std::path::absolute(dir)?,
        None => env::current_dir()?,
    };

    let mut exec = ExecutionContext::new(
        cli.repo.into(),
        cli.build.into(),
        cli.commit.into(),
        configuration,
        work_dir,
    );

    let git = GitCommandAdapter::new(Redactor::new(&exec.config.token))
        .with_program(plugin.git_binary);
    let ctx = AppContext::new(git, MinijinjaTemplateRenderer::new());

    publish::execute(&ctx, &mut exec)
}
