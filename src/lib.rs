//! Locates, validates, and creates the on-disk structure of a git repository.
//!
//! This crate is the bootstrap layer that later subsystems (object store,
//! reference store, index) build upon. It answers three questions:
//!
//! * Is this path a repository? See [`Repository::open`] and
//!   [`Repository::discover`].
//! * Where does a given piece of metadata live inside the `.git` directory?
//!   See [`Repository::resolve_path`], [`Repository::resolve_file`], and
//!   [`Repository::resolve_dir`].
//! * How is a brand-new repository laid out? See [`Repository::create`].
//!
//! It intentionally uses the same `.git` folder format as command-line git.

#![deny(warnings)]

pub mod fragment;

pub mod repo;
pub use repo::{Config, CoreConfig, Error, Repository, Result};

pub use fragment::{check_fragment, FragmentError};

#[cfg(test)]
mod test_support;
