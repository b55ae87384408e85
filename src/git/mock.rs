use crate::error::{BumpError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Records every path passed to [`Repository::stage_file`] so tests can
/// assert on re-staging.
#[derive(Debug)]
pub struct MockRepository {
    staged: Vec<String>,
    committed: HashMap<String, String>,
    fail_staged_listing: bool,
    fail_committed_lookup: bool,
    fail_stage: bool,
    stage_calls: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            staged: Vec::new(),
            committed: HashMap::new(),
            fail_staged_listing: false,
            fail_committed_lookup: false,
            fail_stage: false,
            stage_calls: RefCell::new(Vec::new()),
        }
    }

    /// Mark a path as staged
    pub fn add_staged(&mut self, path: impl Into<String>) {
        self.staged.push(path.into());
    }

    /// Set the HEAD content of a file
    pub fn set_committed(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.committed.insert(path.into(), content.into());
    }

    /// Make `staged_files` return an error
    pub fn fail_staged_listing(&mut self) {
        self.fail_staged_listing = true;
    }

    /// Make `committed_file` return an error
    pub fn fail_committed_lookup(&mut self) {
        self.fail_committed_lookup = true;
    }

    /// Make `stage_file` return an error
    pub fn fail_stage(&mut self) {
        self.fail_stage = true;
    }

    /// Paths passed to `stage_file`, in call order
    pub fn stage_calls(&self) -> Vec<String> {
        self.stage_calls.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn staged_files(&self) -> Result<Vec<String>> {
        if self.fail_staged_listing {
            return Err(BumpError::Git(git2::Error::from_str("index unavailable")));
        }
        Ok(self.staged.clone())
    }

    fn committed_file(&self, path: &str) -> Result<Option<String>> {
        if self.fail_committed_lookup {
            return Err(BumpError::Git(git2::Error::from_str("bad object HEAD")));
        }
        Ok(self.committed.get(path).cloned())
    }

    fn stage_file(&self, path: &str) -> Result<()> {
        if self.fail_stage {
            return Err(BumpError::stage(format!("Cannot stage {}", path)));
        }
        self.stage_calls.borrow_mut().push(path.to_string());
        Ok(())
    }
}
