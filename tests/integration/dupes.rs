//! Integration tests for the duplicate search.

use scanutils::tools::find_duplicates;

use crate::common::{dir_with_files, write_file};

#[test]
fn test_report_output() {
    let root = dir_with_files(&["a.pdf", "b.pdf"], "same size");
    write_file(root.path(), "other.pdf", "different size");

    let report = find_duplicates(root.path()).unwrap();
    let lines = report.lines();

    assert_eq!(report.count(), 1);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "-".repeat(41));
    assert!(lines[2].starts_with("rm -f \"") && lines[2].ends_with("a.pdf\""));
    assert_eq!(lines[4], "Duplicates found: 1");
}

#[test]
fn test_report_as_json() {
    let root = dir_with_files(&["x", "y"], "1");

    let report = find_duplicates(root.path()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["groups"][0].as_array().unwrap().len(), 2);
}
