pub mod context;
pub mod credentials;
pub mod error;
pub mod paths;

pub use context::{
    Author, BuildInfo, CommitInfo, Configuration, ExecutionContext, RepositoryInfo,
};
pub use credentials::{AccessToken, CloneUrl, Redactor, parse_catalog_repo};
pub use error::AppError;
pub use paths::{RENDER_JOBS, RenderJob, RenderScope};
