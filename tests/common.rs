use std::{fs, path::Path};

// Recursively list everything below `root`, relative to `root`, sorted.
// Directories carry a trailing `/`.
#[allow(dead_code)]
pub fn list_entries(root: &Path) -> Vec<String> {
    let mut entries = Vec::new();
    collect_entries(root, root, &mut entries);
    entries.sort();
    entries
}

fn collect_entries(root: &Path, dir: &Path, entries: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let rel = path
            .strip_prefix(root)
            .unwrap()
            .to_str()
            .unwrap()
            .replace('\\', "/");

        if path.is_dir() {
            entries.push(format!("{}/", rel));
            collect_entries(root, &path, entries);
        } else {
            entries.push(rel);
        }
    }
}

// Populate `path/.git` with something that isn't a repository.
#[allow(dead_code)]
pub fn occupy_git_dir(path: &Path) {
    let git_dir = path.join(".git");
    fs::create_dir_all(&git_dir).unwrap();
    fs::write(git_dir.join("packed-refs"), "# pack-refs with: peeled\n").unwrap();
}
