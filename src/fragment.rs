//! Validation of path fragments that name entries inside a `.git` directory.

use std::path::{Component, Path};

use thiserror::Error;

/// Reasons why a given string can not be accepted as a path fragment.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum FragmentError {
    #[error("path is empty")]
    EmptyPath,

    #[error("path is absolute")]
    AbsolutePath,

    #[error("path ends with a slash")]
    TrailingSlash,

    #[error("path contains an empty segment")]
    DuplicateSlash,

    #[error("path contains a NUL byte")]
    ContainsNull,

    #[error("path contains a `.` segment")]
    CurrentDir,

    #[error("path contains a `..` segment")]
    ParentDir,

    #[error("path segment is not a plain file name on this platform")]
    NotNormal,
}

/// Check that `fragment` is acceptable as a path relative to a repository's
/// `.git` directory: relative, with no traversal or empty segments.
///
/// `/`-separated segments are allowed.
pub fn check_fragment(fragment: &str) -> Result<(), FragmentError> {
    if fragment.is_empty() {
        Err(FragmentError::EmptyPath)
    } else if fragment.starts_with('/') {
        Err(FragmentError::AbsolutePath)
    } else if fragment.ends_with('/') {
        Err(FragmentError::TrailingSlash)
    } else {
        for segment in fragment.split('/') {
            match check_segment(segment) {
                Err(FragmentError::EmptyPath) => Err(FragmentError::DuplicateSlash),
                x => x,
            }?;
        }
        Ok(())
    }
}

fn check_segment(segment: &str) -> Result<(), FragmentError> {
    if segment.is_empty() {
        Err(FragmentError::EmptyPath)
    } else if segment.contains('\0') {
        Err(FragmentError::ContainsNull)
    } else if segment == "." {
        Err(FragmentError::CurrentDir)
    } else if segment == ".." {
        Err(FragmentError::ParentDir)
    } else {
        // Catches drive prefixes and backslash separators on Windows.
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(FragmentError::NotNormal),
        }
    }
}
