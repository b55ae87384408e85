//! The pre-commit bump workflow.
//!
//! A run lists the staged paths, decides whether the change set warrants a
//! patch bump, and if so rewrites the manifest's `project.version` and adds
//! the manifest back to the index. Every run ends in exactly one [`Outcome`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{BumpError, Result};
use crate::git::Repository;
use crate::manifest;
use crate::version;

/// Why a run ended without bumping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The index holds no changes.
    NothingStaged,
    /// Nothing under a source prefix is staged and neither is the manifest.
    NoRelevantChanges {
        manifest: String,
        prefixes: Vec<String>,
    },
    /// The manifest is staged and its version already differs from HEAD.
    ManualBump { manifest: String, version: String },
    /// The working-tree version differs from HEAD but the manifest is not staged.
    AlreadyBumped { manifest: String, version: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NothingStaged => {
                write!(f, "No staged files detected, skipping version bump")
            }
            SkipReason::NoRelevantChanges { manifest, prefixes } => write!(
                f,
                "No {} or {} changes staged, skipping version bump",
                prefixes.join(", "),
                manifest
            ),
            SkipReason::ManualBump { manifest, version } => write!(
                f,
                "{} staged with version change ({}); assuming manual bump",
                manifest, version
            ),
            SkipReason::AlreadyBumped { manifest, version } => write!(
                f,
                "Version already bumped in working tree ({}); stage {} to include it",
                version, manifest
            ),
        }
    }
}

/// Result of comparing the committed and working versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Skip(SkipReason),
    Bump,
}

/// Terminal result of a [`VersionBumper::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    Bumped {
        from: String,
        to: String,
        staged: bool,
    },
    /// Dry run: the bump that would have been applied.
    WouldBump { from: String, to: String },
}

impl Outcome {
    /// True when the manifest was rewritten on disk.
    pub fn is_bumped(&self) -> bool {
        matches!(self, Outcome::Bumped { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped(reason) => write!(f, "{}", reason),
            Outcome::Bumped {
                from,
                to,
                staged: true,
            } => write!(f, "Version bumped to {} (was {})", to, from),
            Outcome::Bumped {
                from,
                to,
                staged: false,
            } => write!(f, "Version bumped to {} (was {}); manifest left unstaged", to, from),
            Outcome::WouldBump { from, to } => {
                write!(f, "Dry run: would bump version from {} to {}", from, to)
            }
        }
    }
}

/// Bumps the manifest's patch version when relevant files are staged.
///
/// The repository, configuration and working-tree root are all injected, so
/// the same workflow runs against [`crate::git::Git2Repository`] in the
/// binary and [`crate::git::MockRepository`] in tests.
pub struct VersionBumper<R: Repository> {
    repo: R,
    config: Config,
    root: PathBuf,
    dry_run: bool,
}

impl<R: Repository> VersionBumper<R> {
    /// Creates a bumper for the working tree rooted at `root`.
    pub fn new(repo: R, config: Config, root: impl Into<PathBuf>) -> Self {
        VersionBumper {
            repo,
            config,
            root: root.into(),
            dry_run: false,
        }
    }

    /// In dry-run mode the manifest and the index are never touched.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Repository-relative manifest path in index form.
    fn manifest_key(&self) -> String {
        normalize_path(&self.config.manifest_path)
            .trim_start_matches("./")
            .to_string()
    }

    fn manifest_file(&self) -> PathBuf {
        self.root.join(Path::new(&self.config.manifest_path))
    }

    /// Staged paths, normalised to `/` separators. A failing repository
    /// counts as nothing staged.
    pub fn list_staged_files(&self) -> Vec<String> {
        match self.repo.staged_files() {
            Ok(paths) => paths
                .iter()
                .map(|p| normalize_path(p))
                .filter(|p| !p.is_empty())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn is_manifest_staged(&self, staged: &[String]) -> bool {
        let key = self.manifest_key();
        staged.iter().any(|p| *p == key)
    }

    /// True iff a staged path lies under a source prefix or is the manifest.
    pub fn should_bump(&self, staged: &[String]) -> bool {
        let has_source_changes = staged.iter().any(|path| {
            self.config
                .source_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
        });

        has_source_changes || self.is_manifest_staged(staged)
    }

    /// Version recorded in the HEAD copy of the manifest, if there is one.
    ///
    /// Lookup and parse failures are treated as "no committed version".
    pub fn read_committed_version(&self) -> Option<String> {
        let content = self.repo.committed_file(&self.manifest_key()).ok()??;
        manifest::read_version(&content)
            .ok()
            .filter(|v| !v.is_empty())
    }

    /// Version currently on disk.
    pub fn read_working_version(&self) -> Result<String> {
        let path = self.manifest_file();
        let content = fs::read_to_string(&path).map_err(|e| {
            BumpError::parse(format!("Cannot read {}: {}", path.display(), e))
        })?;
        manifest::read_version(&content)
    }

    /// Guards against double increments: a working version that already
    /// differs from HEAD is left alone.
    pub fn decide(&self, committed: Option<&str>, working: &str, manifest_staged: bool) -> Action {
        match committed {
            Some(committed) if committed != working => {
                let manifest = self.manifest_key();
                let version = working.to_string();
                if manifest_staged {
                    Action::Skip(SkipReason::ManualBump { manifest, version })
                } else {
                    Action::Skip(SkipReason::AlreadyBumped { manifest, version })
                }
            }
            _ => Action::Bump,
        }
    }

    /// Writes `new_version` into the on-disk manifest, changing nothing else.
    pub fn rewrite_manifest(&self, new_version: &str) -> Result<()> {
        let path = self.manifest_file();
        let original = fs::read_to_string(&path)?;
        let updated = manifest::rewrite_version(&original, new_version, &self.manifest_key())?;
        fs::write(&path, updated)?;
        Ok(())
    }

    pub fn stage_manifest(&self) -> Result<()> {
        let key = self.manifest_key();
        self.repo.stage_file(&key).map_err(|e| match e {
            BumpError::Stage(_) => e,
            other => BumpError::stage(format!(
                "Failed to stage {} after bumping version: {}",
                key, other
            )),
        })
    }

    /// Runs the whole workflow once.
    ///
    /// # Returns
    /// * `Ok(Outcome)` - The terminal state, skipped or bumped
    /// * `Err` - Malformed or missing version, version line not found, or staging failure
    pub fn run(&self) -> Result<Outcome> {
        let staged = self.list_staged_files();
        if staged.is_empty() {
            return Ok(Outcome::Skipped(SkipReason::NothingStaged));
        }

        if !self.should_bump(&staged) {
            return Ok(Outcome::Skipped(SkipReason::NoRelevantChanges {
                manifest: self.manifest_key(),
                prefixes: self.config.source_prefixes.clone(),
            }));
        }

        let manifest_staged = self.is_manifest_staged(&staged);
        let committed = self.read_committed_version();
        let working = self.read_working_version()?;

        if let Action::Skip(reason) = self.decide(committed.as_deref(), &working, manifest_staged)
        {
            return Ok(Outcome::Skipped(reason));
        }

        let new_version = version::increment(&working)?;

        if self.dry_run {
            return Ok(Outcome::WouldBump {
                from: working,
                to: new_version,
            });
        }

        self.rewrite_manifest(&new_version)?;

        if self.config.stage {
            self.stage_manifest()?;
        }

        Ok(Outcome::Bumped {
            from: working,
            to: new_version,
            staged: self.config.stage,
        })
    }
}

fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}
