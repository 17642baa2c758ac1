use crate::domain::{AppError, ExecutionContext};
use std::path::Path;

/// Renders a template file against the execution context.
pub trait TemplateRenderer {
    fn render(&self, source: &Path, context: &ExecutionContext) -> Result<String, AppError>;
}
