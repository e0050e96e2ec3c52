//! Glob-aware file listing.
//!
//! The tools accept either an explicit list of files, a single directory or
//! a single quoted glob such as `"scans/*.tif"`. [`list_files`] turns any of
//! these into a concrete list of paths. Globs are matched shell style
//! against the path relative to the glob-free prefix; as with `fnmatch`, a
//! `*` also matches `/` and a `[` without a closing `]` is a literal
//! character.
//!
//! # Examples
//!
//! ```
//! use scanutils::listing::{is_glob, split_glob};
//!
//! assert!(is_glob("*.txt"));
//! assert_eq!(split_glob("/data/*.txt"), ("/data".to_string(), "*.txt".to_string()));
//! ```

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, ScanError};

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[!?.*\]").unwrap());

/// Whether `path_spec` contains glob wildcards (`*`, `?`, `[...]`, `[!...]`).
pub fn is_glob(path_spec: &str) -> bool {
    path_spec.contains(['*', '?']) || BRACKET_RE.is_match(path_spec)
}

/// Split a path containing wildcards into a glob-free prefix and a pattern.
///
/// `/data/*.txt` becomes `("/data", "*.txt")` and `/*.txt` becomes
/// `("/", "*.txt")`. Without glob-free leading segments the prefix is `"."`;
/// without any glob the pattern is empty.
pub fn split_glob(glob_path: &str) -> (String, String) {
    let segments: Vec<&str> = glob_path.split(MAIN_SEPARATOR_STR).collect();
    let literal = segments
        .iter()
        .take_while(|segment| !is_glob(segment))
        .count();

    let prefix = match segments[..literal].join(MAIN_SEPARATOR_STR) {
        _ if literal == 0 => ".".to_string(),
        // Only the empty segment in front of the root separator.
        joined if joined.is_empty() => MAIN_SEPARATOR_STR.to_string(),
        joined => joined,
    };

    (prefix, segments[literal..].join(MAIN_SEPARATOR_STR))
}

/// Resolve command line inputs to a list of file paths.
///
/// - more than one input: returned unchanged, nothing is checked
/// - a single directory: everything below it, sorted; with `default_glob`
///   only the files matching it
/// - a single glob: the files below the glob-free prefix matching the
///   remaining pattern, sorted
/// - anything else: returned unchanged
///
/// A pattern without `*` is only matched down to as many directory levels
/// as it has segments. Subdirectories that cannot be read are skipped.
///
/// # Errors
///
/// Fails if the glob pattern is malformed or the directory to list cannot
/// be read.
pub fn list_files<S: AsRef<str>>(inputs: &[S], default_glob: Option<&str>) -> Result<Vec<String>> {
    let [input] = inputs else {
        return Ok(inputs.iter().map(|s| s.as_ref().to_string()).collect());
    };
    let input = input.as_ref();

    if is_glob(input) {
        let (prefix, pattern) = split_glob(input);
        return list_files_filter(Path::new(&prefix), &pattern);
    }

    let path = Path::new(input);
    if !path.is_dir() {
        return Ok(vec![input.to_string()]);
    }

    match default_glob.filter(|glob| !glob.is_empty()) {
        Some(glob) => list_files_filter(path, glob),
        None => list_files_all(path),
    }
}

fn list_files_all(dir: &Path) -> Result<Vec<String>> {
    let mut output = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1) {
        output.push(entry?.path().to_string_lossy().into_owned());
    }

    output.sort();
    Ok(output)
}

fn list_files_filter(dir: &Path, pattern: &str) -> Result<Vec<String>> {
    let max_depth = if pattern.contains('*') {
        usize::MAX
    } else {
        pattern.split(MAIN_SEPARATOR_STR).count()
    };
    let pattern = glob::Pattern::new(&fnmatch_pattern(pattern))?;
    let mut output = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => continue,
            Err(err) => return Err(err.into()),
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        if pattern.matches(&relative.to_string_lossy()) {
            output.push(entry.path().to_string_lossy().into_owned());
        }
    }

    output.sort();
    Ok(output)
}

/// Rewrite an `fnmatch` pattern for [`glob::Pattern`].
///
/// Runs of `*` collapse into one and a `[` that opens no complete character
/// class is escaped.
fn fnmatch_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut rewritten = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                rewritten.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => {
                // A `]` right after `[` or `[!` belongs to the class.
                let mut start = i + 1;
                if chars.get(start) == Some(&'!') {
                    start += 1;
                }
                if chars.get(start) == Some(&']') {
                    start += 1;
                }

                match chars.iter().skip(start).position(|&c| c == ']') {
                    Some(offset) => {
                        let end = start + offset;
                        rewritten.extend(&chars[i..=end]);
                        i = end;
                    }
                    None => rewritten.push_str("[[]"),
                }
            }
            c => rewritten.push(c),
        }
        i += 1;
    }

    rewritten
}

/// The deepest directory shared by all `paths`.
///
/// If the common prefix names a file rather than a directory, its parent is
/// returned.
///
/// # Errors
///
/// Fails if `paths` is empty or mixes absolute and relative paths.
pub fn common_path<P: AsRef<Path>>(paths: &[P]) -> Result<PathBuf> {
    let (first, rest) = paths
        .split_first()
        .ok_or_else(|| ScanError::invalid_argument("No paths given"))?;

    let first: Vec<Component<'_>> = first.as_ref().components().collect();
    let mut shared = first.len();

    for path in rest {
        let path = path.as_ref();
        if path.is_absolute() != first.first().is_some_and(|c| c == &Component::RootDir) {
            return Err(ScanError::invalid_argument(
                "Can't mix absolute and relative paths",
            ));
        }
        shared = shared.min(
            first
                .iter()
                .zip(path.components())
                .take_while(|(a, b)| *a == b)
                .count(),
        );
    }

    let common: PathBuf = first[..shared].iter().collect();
    let common = if common.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        common
    };

    if common.is_dir() {
        return Ok(common);
    }

    let parent = common
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok(parent.to_path_buf())
}

/// Usage examples for tools that take file lists, e.g. for `--help` text.
///
/// One example per line, or a comma separated list of quoted examples when
/// `inline` is set.
pub fn doc_examples(command_name: &str, extension: &str, indent_spaces: usize, inline: bool) -> String {
    let examples = [
        format!("a.{extension}"),
        format!("a.{extension} b.{extension} c.{extension}"),
        format!("(asterisk).{extension}"),
        format!("\"(asterisk).{extension}\""),
        "dir/".to_string(),
        format!("\"dir/(asterisk).{extension}\""),
    ];

    let prefix = if command_name.is_empty() && indent_spaces == 0 {
        String::new()
    } else {
        format!("{}{} ", " ".repeat(indent_spaces), command_name)
    };

    let examples: Vec<String> = examples
        .iter()
        .map(|example| {
            if inline {
                format!("“{prefix}{example}”")
            } else {
                format!("{prefix}{example}")
            }
        })
        .collect();

    examples.join(if inline { ", " } else { "\n" })
}
