//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations the bumper needs, so the workflow can run against a real
//! repository or a mock.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use bump_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let staged = repo.staged_files()?;
//! if staged.iter().any(|p| p.starts_with("src/")) {
//!     repo.stage_file("pyproject.toml")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations used by [`crate::bumper::VersionBumper`].
///
/// All paths are repository-relative and use `/` as separator.
pub trait Repository {
    /// List paths staged for the next commit.
    ///
    /// Equivalent to `git diff --cached --name-only`: paths whose index entry
    /// differs from HEAD, including deletions. On an unborn branch every
    /// indexed path counts as staged.
    fn staged_files(&self) -> Result<Vec<String>>;

    /// Read a file's content as of the HEAD commit.
    ///
    /// # Returns
    /// * `Ok(Some(content))` - The file exists in HEAD
    /// * `Ok(None)` - There is no HEAD commit, or the file is not part of it
    /// * `Err` - Any other Git failure, or non UTF-8 content
    fn committed_file(&self, path: &str) -> Result<Option<String>>;

    /// Add the working-tree version of `path` to the index.
    fn stage_file(&self, path: &str) -> Result<()>;
}
