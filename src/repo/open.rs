use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{paths::probe, Config, Error, Repository, Result, CONFIG_FILE, GIT_DIR_NAME};

impl Repository {
    /// Open the repository whose worktree is `path`.
    ///
    /// `path/.git` must be a directory holding a `config` file whose
    /// `core.repositoryformatversion` is 0. Use [`Repository::create`] to
    /// create an empty repository if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Repository::locate(path.as_ref(), false)
    }

    /// Find the repository containing `path`.
    ///
    /// Starting at `path` itself, each ancestor directory is checked for a
    /// `.git` directory. The first one found is opened; if it turns out to
    /// be invalid, that error is returned rather than continuing upward.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let start = absolute(path.as_ref())?;

        for candidate in start.ancestors() {
            if candidate.join(GIT_DIR_NAME).is_dir() {
                debug!(path = %candidate.display(), "discovered repository");
                return Repository::open(candidate);
            }
        }

        Err(Error::NotARepository(start))
    }

    // With `force`, nothing is validated and a missing or unreadable config
    // file leaves the config empty. Only `create` may use that: it needs a
    // handle before the `.git` directory is populated.
    pub(crate) fn locate(path: &Path, force: bool) -> Result<Self> {
        let worktree = absolute(path)?;
        let control_dir = worktree.join(GIT_DIR_NAME);
        debug!(path = %worktree.display(), force, "opening repository");

        if !(force || control_dir.is_dir()) {
            return Err(Error::NotARepository(worktree));
        }

        let mut repo = Repository {
            worktree,
            control_dir,
            config: Config::default(),
        };

        if force {
            repo.config = match repo.read_config() {
                Ok(config) => config.unwrap_or_default(),
                Err(err) => {
                    debug!(error = %err, "ignoring unreadable config");
                    Config::default()
                }
            };
        } else {
            let config = repo.read_config()?.ok_or_else(|| {
                let config_path = repo.control_dir.join(CONFIG_FILE);
                Error::MissingConfig(config_path.display().to_string())
            })?;
            config.validate()?;
            repo.config = config;
        }

        Ok(repo)
    }

    fn read_config(&self) -> Result<Option<Config>> {
        let path = match self.resolve_file(&[CONFIG_FILE], false)? {
            Some(path) => path,
            None => return Ok(None),
        };

        match probe(&path)? {
            Some(_) => Config::load(&path).map(Some),
            None => Ok(None),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
