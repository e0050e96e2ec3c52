//! Shared helpers for the integration tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary directory holding `files`, each written with `content`.
pub fn dir_with_files(files: &[&str], content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for file in files {
        write_file(dir.path(), file, content);
    }
    dir
}

/// Write `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write fixture file");
}

/// `dir/name` as a string.
pub fn path_str(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}
