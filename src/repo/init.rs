use std::{fs, path::Path};

use tracing::{debug, info};

use super::{
    paths::probe, Config, Error, Repository, Result, CONFIG_FILE, DESCRIPTION_FILE, HEAD_FILE,
};

const DESCRIPTION_TEXT: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const HEAD_TEXT: &str = "ref: refs/heads/master\n";

const SKELETON_DIRS: [&[&str]; 4] = [
    &["branches"],
    &["objects"],
    &["refs", "tags"],
    &["refs", "heads"],
];

impl Repository {
    /// Creates a new, empty git repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    ///
    /// `path` becomes the worktree and is created if it doesn't exist. If
    /// it does exist, it must be a directory and must not already contain a
    /// non-empty `.git` directory.
    ///
    /// A failure part way through leaves whatever was already written on
    /// disk.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::locate(path.as_ref(), true)?;
        debug!(path = %repo.worktree.display(), "creating repository");

        prepare_worktree(&repo)?;

        create_skeleton_dirs(&repo)?;
        create_description(&repo)?;
        create_head(&repo)?;
        create_config(&repo)?;

        let repo = Repository::locate(&repo.worktree, false)?;
        info!(path = %repo.control_dir.display(), "initialized empty repository");
        Ok(repo)
    }
}

fn prepare_worktree(repo: &Repository) -> Result<()> {
    match probe(&repo.worktree)? {
        Some(metadata) if !metadata.is_dir() => Err(Error::NotADirectory(repo.worktree.clone())),

        Some(_) => match probe(&repo.control_dir)? {
            Some(metadata) if !metadata.is_dir() => {
                Err(Error::NotADirectory(repo.control_dir.clone()))
            }
            Some(_) if fs::read_dir(&repo.control_dir)?.next().is_some() => {
                Err(Error::TargetNotEmpty(repo.control_dir.clone()))
            }
            _ => Ok(()),
        },

        None => {
            fs::create_dir_all(&repo.worktree)?;
            debug!(path = %repo.worktree.display(), "created worktree");
            Ok(())
        }
    }
}

fn create_skeleton_dirs(repo: &Repository) -> Result<()> {
    for dir in SKELETON_DIRS.iter() {
        repo.ensure_dir(dir)?;
    }
    Ok(())
}

fn create_description(repo: &Repository) -> Result<()> {
    let desc_path = repo.ensure_file(&[DESCRIPTION_FILE])?;
    fs::write(desc_path, DESCRIPTION_TEXT).map_err(|e| e.into())
}

fn create_head(repo: &Repository) -> Result<()> {
    let head_path = repo.ensure_file(&[HEAD_FILE])?;
    fs::write(head_path, HEAD_TEXT).map_err(|e| e.into())
}

fn create_config(repo: &Repository) -> Result<()> {
    let config_path = repo.ensure_file(&[CONFIG_FILE])?;
    Config::new_repository().save(&config_path)
}
