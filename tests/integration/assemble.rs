//! Integration tests for the page-assembly planner.

use scanutils::FilePath;
use scanutils::ScanError;
use scanutils::assemble::{AssemblyPlan, Mode, Side, joined_path};
use std::path::Path;

fn cat(mode: Mode, side: Side, page_number: u32) -> Vec<String> {
    AssemblyPlan::new(mode, side, page_number, 5)
        .unwrap()
        .cat_arguments("m.pdf", "i.pdf")
}

#[test]
fn test_replace_first_page() {
    assert_eq!(
        cat(Mode::Replace, Side::Before, 1),
        ["A=m.pdf", "B=i.pdf", "cat", "B1", "A2-end"]
    );
}

#[test]
fn test_replace_last_page() {
    assert_eq!(
        cat(Mode::Replace, Side::Before, 5),
        ["A=m.pdf", "B=i.pdf", "cat", "A1-4", "B1"]
    );
}

#[test]
fn test_add_before_first_page() {
    assert_eq!(cat(Mode::Add, Side::Before, 1), ["i.pdf", "m.pdf", "cat"]);
}

#[test]
fn test_add_after_last_page() {
    assert_eq!(cat(Mode::Add, Side::After, 5), ["m.pdf", "i.pdf", "cat"]);
}

#[test]
fn test_add_after_second_page() {
    assert_eq!(
        cat(Mode::Add, Side::After, 2),
        ["A=m.pdf", "B=i.pdf", "cat", "A1-2", "B1", "A3-end"]
    );
}

#[test]
fn test_add_after_first_page() {
    assert_eq!(
        cat(Mode::Add, Side::After, 1),
        ["A=m.pdf", "B=i.pdf", "cat", "A1", "B1", "A2-end"]
    );
}

#[test]
fn test_full_command_writes_joined_file() {
    let main = FilePath::resolve_against(Path::new("book.pdf"), Path::new("/scans"), true);
    let insert = FilePath::resolve_against(Path::new("tmp.pdf"), Path::new("/tmp/x"), true);
    let result = joined_path(&main);

    let plan = AssemblyPlan::new(Mode::Replace, Side::Before, 3, 5).unwrap();
    let command = plan.command(&main, &insert, &result);

    assert_eq!(
        command.to_string(),
        "pdftk A=/scans/book.pdf B=/tmp/x/tmp.pdf cat A1-2 B1 A4-end output /scans/book_joined.pdf"
    );
}

#[test]
fn test_out_of_range_page() {
    let err = AssemblyPlan::new(Mode::Replace, Side::Before, 6, 5).unwrap_err();
    assert!(matches!(
        err,
        ScanError::PageOutOfRange {
            page_number: 6,
            page_count: 5
        }
    ));
    assert_eq!(err.exit_code(), 1);
}
