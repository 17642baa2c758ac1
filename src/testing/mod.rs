mod fake_git;

pub use fake_git::{FakeGit, GitCall};
