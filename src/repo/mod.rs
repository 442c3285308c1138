//! A git repository stored on the local file system.
//!
//! A [`Repository`] is an immutable handle: the worktree path, the path to
//! its `.git` control directory, and a snapshot of `.git/config` taken when
//! the handle was opened. The handle does not own or lock anything on disk;
//! other processes may change the same directory at any time.
//!
//! Handles are obtained only through [`Repository::open`],
//! [`Repository::discover`], or [`Repository::create`]. Subsystems that
//! store data under `.git` should build their paths with the resolver
//! methods ([`Repository::resolve_path`] and friends) rather than joining
//! paths themselves.

use std::path::{Path, PathBuf};

mod config;
pub use config::{
    Config, CoreConfig, BARE, CORE, FILE_MODE, REPOSITORY_FORMAT_VERSION,
    SUPPORTED_FORMAT_VERSION,
};

mod error;
pub use error::{Error, Result};

mod init;
mod open;
mod paths;

/// Name of the control directory inside a worktree.
pub const GIT_DIR_NAME: &str = ".git";

pub const CONFIG_FILE: &str = "config";
pub const DESCRIPTION_FILE: &str = "description";
pub const HEAD_FILE: &str = "HEAD";

/// Handle to a validated repository.
#[derive(Clone, Debug)]
pub struct Repository {
    worktree: PathBuf,
    control_dir: PathBuf,
    config: Config,
}

impl Repository {
    /// Return the top-level working directory for this repo.
    pub fn worktree(&self) -> &Path {
        self.worktree.as_path()
    }

    /// Return the path to the `.git` directory.
    ///
    /// Callers should not assume this is a child of [`Repository::worktree`].
    pub fn control_dir(&self) -> &Path {
        self.control_dir.as_path()
    }

    /// Return the configuration as it was read when this handle was opened.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests;
