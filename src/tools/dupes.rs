//! Duplicate detection by file size.
//!
//! Files of equal byte size are reported as duplicate candidates. The
//! report is printed as a list of `rm -f` commands to edit and paste into a
//! shell.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::Result;

/// Width of the separator line between groups.
const SEPARATOR_WIDTH: usize = 41;

/// Groups of files sharing the same size below a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    /// The searched directory as given.
    pub path: String,
    /// Every group has at least two members, sorted; groups are ordered by
    /// their first member.
    pub groups: Vec<Vec<String>>,
}

impl DuplicateReport {
    /// Number of duplicate groups.
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    /// The report as printed by `find-dupes-by-size`.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.path.clone()];

        for group in &self.groups {
            lines.push("-".repeat(SEPARATOR_WIDTH));
            lines.extend(group.iter().map(|path| format!("rm -f \"{path}\"")));
        }

        lines.push(format!("Duplicates found: {}", self.count()));
        lines
    }
}

/// Walk `path` recursively and group regular files by size.
///
/// # Errors
///
/// Fails if a directory entry or its metadata cannot be read.
pub fn find_duplicates(path: &Path) -> Result<DuplicateReport> {
    let mut sizes: BTreeMap<u64, Vec<String>> = BTreeMap::new();

    for entry in WalkDir::new(path) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let size = entry.metadata()?.len();
        sizes
            .entry(size)
            .or_default()
            .push(entry.path().to_string_lossy().into_owned());
    }

    let mut groups: Vec<Vec<String>> = sizes
        .into_values()
        .filter(|paths| paths.len() > 1)
        .map(|mut paths| {
            paths.sort();
            paths
        })
        .collect();
    groups.sort();

    Ok(DuplicateReport {
        path: path.to_string_lossy().into_owned(),
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "12345").unwrap();
        fs::write(dir.path().join("a.txt"), "abcde").unwrap();
        fs::write(dir.path().join("unique.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.bin"), "zz").unwrap();
        fs::write(dir.path().join("d.bin"), "yy").unwrap();

        let report = find_duplicates(dir.path()).unwrap();
        let root = dir.path().to_string_lossy().into_owned();

        assert_eq!(report.count(), 2);
        assert_eq!(
            report.groups,
            [
                vec![format!("{root}/a.txt"), format!("{root}/b.txt")],
                vec![format!("{root}/d.bin"), format!("{root}/sub/c.bin")],
            ]
        );
    }

    #[test]
    fn test_no_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one"), "1").unwrap();
        fs::write(dir.path().join("two"), "22").unwrap();

        let report = find_duplicates(dir.path()).unwrap();

        assert_eq!(report.count(), 0);
        assert_eq!(report.lines().last().unwrap(), "Duplicates found: 0");
    }

    #[test]
    fn test_lines() {
        let report = DuplicateReport {
            path: "/data".to_string(),
            groups: vec![vec!["/data/a".to_string(), "/data/b".to_string()]],
        };

        assert_eq!(
            report.lines(),
            [
                "/data",
                "-----------------------------------------",
                "rm -f \"/data/a\"",
                "rm -f \"/data/b\"",
                "Duplicates found: 1",
            ]
        );
    }

    #[test]
    fn test_missing_directory() {
        assert!(find_duplicates(Path::new("/definitely/not/here")).is_err());
    }
}
