use std::{
    fs,
    path::{Path, PathBuf},
};

/// A `TempSkeleton` lays out, by hand, the directory tree a freshly created
/// repository is expected to have. Unit tests compare it against the output
/// of `Repository::create` with `dir_diff`.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempSkeleton {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempSkeleton {
    // Create the reference layout in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempSkeleton {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();

        let git_dir = path.join(".git");
        for dir in &["branches", "objects", "refs/tags", "refs/heads"] {
            fs::create_dir_all(git_dir.join(dir)).unwrap();
        }

        fs::write(
            git_dir.join("description"),
            "Unnamed repository; edit this file 'description' to name the repository.\n",
        )
        .unwrap();

        fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();

        fs::write(
            git_dir.join("config"),
            "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n",
        )
        .unwrap();

        TempSkeleton { tempdir, path }
    }

    // Return the path for the skeleton's worktree.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::TempSkeleton;

    #[test]
    fn temp_path() {
        let path = {
            let s = TempSkeleton::new();
            let path = s.path().to_path_buf();

            assert!(path.join(".git/refs/heads").is_dir());
            assert!(path.join(".git/HEAD").is_file());

            path
        };

        assert!(!path.is_dir());
    }
}
