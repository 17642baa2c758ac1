mod git;
mod template_renderer;

pub use git::GitPort;
pub use template_renderer::TemplateRenderer;
