use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, SecondsFormat};
use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};

use crate::domain::{AppError, ExecutionContext};
use crate::ports::TemplateRenderer;

/// Template renderer using Minijinja.
///
/// Templates are read from disk on every call; nothing is cached between
/// renders, so two renders of the same context produce identical output.
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinijinjaTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(&self, source: &Path, context: &ExecutionContext) -> Result<String, AppError> {
        let content = fs::read_to_string(source).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => AppError::TemplateNotFound(source.to_path_buf()),
            _ => AppError::Io(err),
        })?;
        let name = source.display().to_string();

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("datetime", datetime);

        env.add_template(&name, &content).map_err(|err| AppError::TemplateSyntax {
            template: name.clone(),
            reason: err.to_string(),
        })?;

        let template = env.get_template(&name).map_err(|err| AppError::TemplateSyntax {
            template: name.clone(),
            reason: err.to_string(),
        })?;

        template
            .render(Value::from_serialize(context))
            .map_err(|err| AppError::TemplateRender { template: name.clone(), reason: err.to_string() })
    }
}

/// `{{ build.created | datetime }}` renders unix seconds as RFC 3339 UTC.
fn datetime(seconds: i64) -> Result<String, minijinja::Error> {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or_else(|| {
            minijinja::Error::new(ErrorKind::InvalidOperation, format!("timestamp {seconds} out of range"))
        })
}
