use std::fs;

use super::super::*;

#[test]
fn happy_path() {
    let tempdir = tempfile::tempdir().unwrap();
    let worktree = tempdir.path();
    Repository::create(worktree).unwrap();

    let r = Repository::open(worktree).unwrap();
    assert_eq!(r.worktree(), worktree);
    assert_eq!(r.control_dir(), worktree.join(".git").as_path());
    assert_eq!(r.config().get("core", "bare"), Some("false"));
    assert_eq!(r.config().core().unwrap(), CoreConfig::default());
}

#[test]
fn error_no_work_dir() {
    let tempdir = tempfile::tempdir().unwrap();
    let worktree = tempdir.path().join("bogus");

    let err = Repository::open(&worktree).unwrap_err();
    if let Error::NotARepository(path) = err {
        assert_eq!(path, worktree);
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_no_git_dir() {
    let tempdir = tempfile::tempdir().unwrap();
    let err = Repository::open(tempdir.path()).unwrap_err();
    if let Error::NotARepository(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_git_dir_is_file() {
    let tempdir = tempfile::tempdir().unwrap();
    fs::write(tempdir.path().join(".git"), "gitdir: ../elsewhere\n").unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    assert!(matches!(err, Error::NotARepository(_)), "{:?}", err);
}

#[test]
fn error_missing_config() {
    let tempdir = tempfile::tempdir().unwrap();
    fs::create_dir(tempdir.path().join(".git")).unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    if let Error::MissingConfig(what) = err {
        assert!(what.ends_with("config"), "{}", what);
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_unsupported_version() {
    let tempdir = tempfile::tempdir().unwrap();
    let r = Repository::create(tempdir.path()).unwrap();
    fs::write(
        r.control_dir().join("config"),
        "[core]\n\trepositoryformatversion = 1\n",
    )
    .unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    if let Error::UnsupportedFormatVersion(version) = err {
        assert_eq!(version, "1");
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_version_absent() {
    let tempdir = tempfile::tempdir().unwrap();
    let r = Repository::create(tempdir.path()).unwrap();
    fs::write(r.control_dir().join("config"), "[core]\n\tbare = false\n").unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    assert!(matches!(err, Error::MissingConfig(_)), "{:?}", err);
}

#[test]
fn error_malformed_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let r = Repository::create(tempdir.path()).unwrap();
    fs::write(r.control_dir().join("config"), "repositoryformatversion = 0\n").unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { line: 1, .. }), "{:?}", err);
}

#[test]
fn unknown_keys_are_accepted() {
    let tempdir = tempfile::tempdir().unwrap();
    let r = Repository::create(tempdir.path()).unwrap();
    fs::write(
        r.control_dir().join("config"),
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n[extensions]\n\tfuture = yes\n",
    )
    .unwrap();

    let r = Repository::open(tempdir.path()).unwrap();
    assert!(r.config().core().unwrap().file_mode);
    assert_eq!(r.config().get("extensions", "future"), Some("yes"));
}

#[test]
fn forced_open_skips_validation() {
    let tempdir = tempfile::tempdir().unwrap();
    let worktree = tempdir.path().join("not-yet");

    let r = Repository::locate(&worktree, true).unwrap();
    assert_eq!(r.worktree(), worktree.as_path());
    assert!(r.config().is_empty());
    assert!(!worktree.exists());
}

#[test]
fn forced_open_ignores_malformed_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let git_dir = tempdir.path().join(".git");
    fs::create_dir(&git_dir).unwrap();
    fs::write(git_dir.join("config"), "[core\n").unwrap();

    let r = Repository::locate(tempdir.path(), true).unwrap();
    assert!(r.config().is_empty());
}

#[test]
fn forced_open_reads_existing_config() {
    let tempdir = tempfile::tempdir().unwrap();
    Repository::create(tempdir.path()).unwrap();

    let r = Repository::locate(tempdir.path(), true).unwrap();
    assert_eq!(r.config(), &Config::new_repository());
}

#[test]
fn discover_from_nested_dir() {
    let tempdir = tempfile::tempdir().unwrap();
    let worktree = tempdir.path().join("project");
    Repository::create(&worktree).unwrap();

    let nested = worktree.join("src/deeply/nested");
    fs::create_dir_all(&nested).unwrap();

    let r = Repository::discover(&nested).unwrap();
    assert_eq!(r.worktree(), worktree.as_path());

    let r = Repository::discover(&worktree).unwrap();
    assert_eq!(r.worktree(), worktree.as_path());
}

#[test]
fn discover_stops_at_invalid_repo() {
    let tempdir = tempfile::tempdir().unwrap();
    let outer = tempdir.path();
    Repository::create(outer).unwrap();

    let inner = outer.join("vendor/lib");
    fs::create_dir_all(inner.join(".git")).unwrap();

    let err = Repository::discover(inner.join("src")).unwrap_err();
    assert!(matches!(err, Error::MissingConfig(_)), "{:?}", err);
}
