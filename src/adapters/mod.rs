pub mod git_command;
pub mod icon_assets;
pub mod template;

pub use git_command::GitCommandAdapter;
pub use template::MinijinjaTemplateRenderer;
