//! Resolution of paths inside a repository's `.git` directory.
//!
//! Every fragment is validated before any I/O happens. Only directories are
//! ever created here; files are left to the caller.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{Error, Repository, Result};
use crate::fragment::{check_fragment, FragmentError};

impl Repository {
    /// Compute the path of `fragments` under the `.git` directory.
    ///
    /// Performs no I/O: the result may or may not exist.
    pub fn resolve_path(&self, fragments: &[&str]) -> Result<PathBuf> {
        let mut path = self.control_dir.clone();
        for segment in segments(fragments)? {
            path.push(segment);
        }
        Ok(path)
    }

    /// Same as [`Repository::resolve_path`], but first make sure the
    /// directory that will hold the file exists.
    ///
    /// With `create_parents`, missing parent directories are created.
    /// Without it, a missing parent yields `Ok(None)`.
    pub fn resolve_file(
        &self,
        fragments: &[&str],
        create_parents: bool,
    ) -> Result<Option<PathBuf>> {
        let path = self.resolve_path(fragments)?;
        let parents = file_parents(fragments)?;

        if create_parents {
            self.ensure_dir(parents)?;
            Ok(Some(path))
        } else {
            Ok(self.find_dir(parents)?.map(|_| path))
        }
    }

    /// Resolve a directory under the `.git` directory.
    ///
    /// An existing directory is returned as is. A missing one is created
    /// (along with any missing parents) if `create` is set; otherwise the
    /// result is `Ok(None)`. Anything along the way that exists but is not a
    /// directory is an [`Error::NotADirectory`].
    ///
    /// An empty `fragments` slice resolves the `.git` directory itself.
    pub fn resolve_dir(&self, fragments: &[&str], create: bool) -> Result<Option<PathBuf>> {
        if create {
            self.ensure_dir(fragments).map(Some)
        } else {
            self.find_dir(fragments)
        }
    }

    /// Like `resolve_file` with `create_parents`, for callers that need the
    /// path itself rather than an `Option`.
    pub(crate) fn ensure_file(&self, fragments: &[&str]) -> Result<PathBuf> {
        let path = self.resolve_path(fragments)?;
        self.ensure_dir(file_parents(fragments)?)?;
        Ok(path)
    }

    pub(crate) fn ensure_dir(&self, fragments: &[&str]) -> Result<PathBuf> {
        let names = segments(fragments)?;

        let mut path = self.control_dir.clone();
        make_dir(&path, true)?;

        for segment in names {
            path.push(segment);
            make_dir(&path, false)?;
        }

        Ok(path)
    }

    fn find_dir(&self, fragments: &[&str]) -> Result<Option<PathBuf>> {
        let names = segments(fragments)?;

        let mut path = self.control_dir.clone();
        if !is_dir(&path)? {
            return Ok(None);
        }

        for segment in names {
            path.push(segment);
            if !is_dir(&path)? {
                return Ok(None);
            }
        }

        Ok(Some(path))
    }
}

/// Look up `path` without following the "doesn't exist means error"
/// convention of `fs::metadata`.
pub(crate) fn probe(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

// Returns `Ok(false)` when `path` doesn't exist.
fn is_dir(path: &Path) -> Result<bool> {
    match probe(path)? {
        Some(metadata) if metadata.is_dir() => Ok(true),
        Some(_) => Err(Error::NotADirectory(path.to_path_buf())),
        None => Ok(false),
    }
}

fn make_dir(path: &Path, with_parents: bool) -> Result<()> {
    if is_dir(path)? {
        return Ok(());
    }

    let created = if with_parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };

    settle_created(path, created)
}

// Between the `is_dir` check and the create call, someone else may have
// created the same entry.
fn settle_created(path: &Path, created: io::Result<()>) -> Result<()> {
    match created {
        Ok(()) => {
            debug!(path = %path.display(), "created directory");
            Ok(())
        }

        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            if is_dir(path)? {
                Ok(())
            } else {
                Err(Error::NotADirectory(path.to_path_buf()))
            }
        }

        Err(err) => Err(err.into()),
    }
}

fn file_parents<'a, 'f>(fragments: &'a [&'f str]) -> Result<&'a [&'f str]> {
    fragments
        .split_last()
        .map(|(_, parents)| parents)
        .ok_or_else(|| Error::InvalidPathFragment {
            fragment: String::new(),
            reason: FragmentError::EmptyPath,
        })
}

fn segments<'f>(fragments: &[&'f str]) -> Result<Vec<&'f str>> {
    let mut segments = Vec::new();
    for &fragment in fragments {
        check_fragment(fragment).map_err(|reason| Error::InvalidPathFragment {
            fragment: fragment.to_string(),
            reason,
        })?;
        segments.extend(fragment.split('/'));
    }
    Ok(segments)
}
