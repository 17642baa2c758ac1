//! Plugin configuration: CLI/environment values layered over an optional TOML file.

mod load_config;

pub use load_config::{CatalogFile, CatalogSection, load_config_file, parse_config_content};

use crate::domain::{AccessToken, AppError, Configuration, parse_catalog_repo};

pub const DEFAULT_REMOTE_BASE: &str = "https://github.com";

/// Values supplied on the command line or through the environment.
/// Each one wins over the same key in the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog_repo: Option<String>,
    pub token: Option<AccessToken>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub template_name: Option<String>,
    pub template_version: Option<String>,
    pub remote_base: Option<String>,
}

/// Merge overrides with the file section and check every field is present.
///
/// Missing fields are reported together.
pub fn resolve(
    overrides: ConfigOverrides,
    file: Option<CatalogSection>,
) -> Result<Configuration, AppError> {
    let file = file.unwrap_or_default();

    let catalog_repo = pick(overrides.catalog_repo, file.repo);
    let token = pick(overrides.token.map(|token| token.expose().to_string()), file.token)
        .map(AccessToken::new);
    let username = pick(overrides.username, file.username);
    let email = pick(overrides.email, file.email);
    let template_name = pick(overrides.template_name, file.template_name);
    let template_version = pick(overrides.template_version, file.template_version);
    let remote_base = pick(overrides.remote_base, file.remote_base)
        .unwrap_or_else(|| DEFAULT_REMOTE_BASE.to_string());

    let mut missing = Vec::new();
    if catalog_repo.is_none() {
        missing.push("catalog repo");
    }
    if token.is_none() {
        missing.push("access token");
    }
    if username.is_none() {
        missing.push("committer username");
    }
    if email.is_none() {
        missing.push("committer email");
    }
    if template_name.is_none() {
        missing.push("template name");
    }
    if template_version.is_none() {
        missing.push("template version");
    }

    match (catalog_repo, token, username, email, template_name, template_version) {
        (
            Some(catalog_repo),
            Some(token),
            Some(username),
            Some(email),
            Some(template_name),
            Some(template_version),
        ) => {
            parse_catalog_repo(&catalog_repo)?;
            if template_name.contains('/') || template_name == "." || template_name == ".." {
                return Err(AppError::config_error(format!(
                    "Invalid template name '{}': must be a single path segment",
                    template_name
                )));
            }
            Ok(Configuration {
                catalog_repo,
                token,
                username,
                email,
                template_name,
                template_version,
                remote_base,
            })
        }
        _ => Err(AppError::config_error(format!(
            "Missing required configuration: {}",
            missing.join(", ")
        ))),
    }
}

fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.map(|value| value.trim().to_string()).filter(|value| !value.is_empty()))
}
