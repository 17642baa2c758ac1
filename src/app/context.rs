use crate::ports::{GitPort, TemplateRenderer};

/// Application context holding dependencies for command execution.
pub struct AppContext<G: GitPort, R: TemplateRenderer> {
    git: G,
    renderer: R,
}

impl<G: GitPort, R: TemplateRenderer> AppContext<G, R> {
    /// Create a new application context.
    pub fn new(git: G, renderer: R) -> Self {
        Self { git, renderer }
    }

    /// Get a reference to the git port.
    pub fn git(&self) -> &G {
        &self.git
    }

    /// Get a reference to the template renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
