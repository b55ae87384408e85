use thiserror::Error;

/// Unified error type for bump-version operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest parsing error: {0}")]
    Parse(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Failed to locate version line in {0}")]
    VersionLineNotFound(String),

    #[error("Staging failed: {0}")]
    Stage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a manifest parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        BumpError::Parse(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a staging error with context
    pub fn stage(msg: impl Into<String>) -> Self {
        BumpError::Stage(msg.into())
    }
}
