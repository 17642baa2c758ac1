use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for catalog publishing.
///
/// Every fatal condition of a run ends up here and is reported once by the
/// CLI handler. Details carried by git variants have already been passed
/// through [`Redactor`](crate::domain::Redactor).
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Catalog repository identifier is not of the form `owner/name`.
    #[error("Invalid catalog repository '{0}': expected 'owner/name'")]
    InvalidCatalogRepo(String),

    /// Remote base URL could not be parsed or cannot carry credentials.
    #[error("Invalid remote base '{base}': {reason}")]
    InvalidRemote { base: String, reason: String },

    /// Git execution failed.
    #[error("Git error running '{command}': {details}")]
    Git { command: String, details: String },

    /// Push failed. Git output is withheld since it may echo the remote URL.
    #[error("Git push failed ({status})")]
    PushFailed { status: String },

    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template could not be parsed.
    #[error("Failed to parse template '{template}': {reason}")]
    TemplateSyntax { template: String, reason: String },

    /// Template rendering failed.
    #[error("Failed to render template '{template}': {reason}")]
    TemplateRender { template: String, reason: String },

    /// No icon matched the configured icon stem.
    #[error("No icon assets matching '{}'", .0.display())]
    IconMissing(PathBuf),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers that classify failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidCatalogRepo(_)
            | AppError::InvalidRemote { .. }
            | AppError::TemplateSyntax { .. }
            | AppError::TemplateRender { .. }
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::TemplateNotFound(_) | AppError::IconMissing(_) => io::ErrorKind::NotFound,
            AppError::Git { .. } | AppError::PushFailed { .. } => io::ErrorKind::Other,
        }
    }
}
