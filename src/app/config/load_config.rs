//! Optional TOML config file.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::domain::AppError;

/// Top level of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// `[catalog]` table. Every key is optional here; presence is checked after
/// merging with command-line values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    pub repo: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub template_name: Option<String>,
    pub template_version: Option<String>,
    pub remote_base: Option<String>,
}

/// Load and parse the config file at `path`.
pub fn load_config_file(path: &Path) -> Result<CatalogSection, AppError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            AppError::config_error(format!("Config file not found: {}", path.display()))
        }
        _ => AppError::Io(err),
    })?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<CatalogSection, AppError> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(file.catalog)
}
