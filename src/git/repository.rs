use crate::error::{BumpError, Result};
use git2::{DiffFindOptions, ErrorCode, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree; bare repositories have none.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn head_tree(&self) -> Result<Option<git2::Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn staged_files(&self) -> Result<Vec<String>> {
        let head_tree = self.head_tree()?;
        let mut index = self.repo.index()?;
        index.read(false)?;

        let mut diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        // Collapse delete+add pairs into renames so only the new path is listed.
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let paths = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();

        Ok(paths)
    }

    fn committed_file(&self, path: &str) -> Result<Option<String>> {
        let tree = match self.head_tree()? {
            Some(tree) => tree,
            None => return Ok(None),
        };

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        let content = String::from_utf8(blob.content().to_vec()).map_err(|e| {
            BumpError::parse(format!("HEAD:{} is not valid UTF-8: {}", path, e))
        })?;

        Ok(Some(content))
    }

    fn stage_file(&self, path: &str) -> Result<()> {
        let mut index = self
            .repo
            .index()
            .map_err(|e| BumpError::stage(format!("Cannot open index: {}", e)))?;

        index
            .read(false)
            .and_then(|_| index.add_path(Path::new(path)))
            .and_then(|_| index.write())
            .map_err(|e| BumpError::stage(format!("Cannot stage {}: {}", path, e)))?;

        Ok(())
    }
}
