pub mod bumper;
pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;
pub mod version;

pub use bumper::{Action, Outcome, SkipReason, VersionBumper};
pub use error::{BumpError, Result};
