//! Integration tests for glob-aware file listing.

use scanutils::listing::{common_path, list_files};
use serial_test::serial;

use crate::common::{dir_with_files, path_str, write_file};

#[test]
fn test_glob_in_data_directory() {
    let root = dir_with_files(&["data/a.txt", "data/b.txt", "data/c.pdf"], "x");
    let pattern = path_str(root.path(), "data/*.txt");

    let files = list_files(&[pattern], None).unwrap();

    assert_eq!(
        files,
        [path_str(root.path(), "data/a.txt"), path_str(root.path(), "data/b.txt")]
    );
}

#[test]
fn test_directory_listing_is_sorted() {
    let root = dir_with_files(&["z.tif", "a.tif", "m.tif"], "x");
    let dir = root.path().to_string_lossy().into_owned();

    let files = list_files(&[dir], None).unwrap();

    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    assert_eq!(files.len(), 3);
}

#[test]
fn test_directory_with_default_glob() {
    let root = dir_with_files(&["a.tif", "b.png", "sub/c.tif"], "x");
    let dir = root.path().to_string_lossy().into_owned();

    let files = list_files(&[dir], Some("*.tif")).unwrap();

    assert_eq!(
        files,
        [path_str(root.path(), "a.tif"), path_str(root.path(), "sub/c.tif")]
    );
}

#[test]
fn test_multiple_inputs_are_returned_verbatim() {
    let inputs = ["does-not-exist.pdf", "*.tif"];
    assert_eq!(list_files(&inputs, None).unwrap(), inputs);
}

#[test]
#[serial]
fn test_relative_glob_from_current_directory() {
    let root = dir_with_files(&["one.txt", "two.txt"], "x");
    write_file(root.path(), "three.md", "x");

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(root.path()).unwrap();
    let files = list_files(&["*.txt"], None);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(files.unwrap(), ["./one.txt", "./two.txt"]);
}

#[test]
fn test_common_path_of_listed_files() {
    let root = dir_with_files(&["scans/a/1.tif", "scans/b/2.tif"], "x");
    let files = list_files(&[path_str(root.path(), "scans/*/*.tif")], None).unwrap();

    assert_eq!(common_path(&files).unwrap(), root.path().join("scans"));
}
