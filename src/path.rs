//! File path descriptors.
//!
//! A [`FilePath`] is a path that has been resolved once (absolute or
//! relative to the current directory) and split into the parts the tools
//! need to name their output files: `filename`, `extension`, `basename`
//! and `base`. Deriving a sibling path never touches the filesystem.
//!
//! # Examples
//!
//! ```no_run
//! use scanutils::path::FilePath;
//!
//! # fn example() -> scanutils::Result<()> {
//! let pdf = FilePath::new("scans/book.pdf", true)?;
//! let joined = pdf.with_append("_joined");
//! assert!(joined.path().ends_with("scans/book_joined.pdf"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// A resolved file path decomposed into its parts.
#[derive(Debug, Clone)]
pub struct FilePath {
    absolute: bool,
    path: String,
    filename: String,
    extension: String,
    basename: String,
    base: String,
}

impl FilePath {
    /// Resolve `path` to an absolute path or to a path relative to the
    /// current directory.
    ///
    /// Resolution is lexical: symlinks are not followed and the file does
    /// not need to exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new(path: impl AsRef<Path>, absolute: bool) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::resolve_against(path.as_ref(), &cwd, absolute))
    }

    /// Resolve `path` against an explicit working directory.
    pub fn resolve_against(path: &Path, cwd: &Path, absolute: bool) -> Self {
        let full = normalize(&cwd.join(path));
        let resolved = if absolute {
            full
        } else {
            relative_to(&full, &normalize(cwd))
        };
        Self::from_resolved(resolved.to_string_lossy().into_owned(), absolute)
    }

    fn from_resolved(path: String, absolute: bool) -> Self {
        let filename = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = split_extension(&filename).to_string();

        let (basename, base) = if extension.is_empty() {
            (filename.clone(), path.clone())
        } else {
            let cut = extension.len() + 1;
            (
                filename[..filename.len() - cut].to_string(),
                path[..path.len() - cut].to_string(),
            )
        };

        Self {
            absolute,
            path,
            filename,
            extension,
            basename,
            base,
        }
    }

    /// Whether this descriptor holds an absolute path.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The absolute (`/home/document/file.ext`) or relative
    /// (`document/file.ext`) path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path as a [`Path`].
    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Basename plus extension, e.g. `file.ext`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The extension without the dot, e.g. `ext`. Empty if there is none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The filename without extension, e.g. `file`.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// The path without extension, e.g. `/home/document/file`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the extension equals `extension`, ignoring ASCII case.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension.eq_ignore_ascii_case(extension)
    }

    /// Derive a sibling path: `base + append + "." + extension`, then remove
    /// every occurrence of `del_substring`.
    ///
    /// `extension` falls back to the current extension when `None` or
    /// empty. The derived descriptor keeps the `absolute` flag.
    pub fn derive(&self, extension: Option<&str>, append: &str, del_substring: &str) -> Self {
        let extension = extension
            .filter(|ext| !ext.is_empty())
            .unwrap_or(&self.extension);

        let mut derived = if extension.is_empty() {
            format!("{}{}", self.base, append)
        } else {
            format!("{}{}.{}", self.base, append, extension)
        };

        if !del_substring.is_empty() {
            derived = derived.replace(del_substring, "");
        }

        let normalized = normalize(Path::new(&derived));
        Self::from_resolved(normalized.to_string_lossy().into_owned(), self.absolute)
    }

    /// Same path with `append` inserted before the extension.
    pub fn with_append(&self, append: &str) -> Self {
        self.derive(None, append, "")
    }

    /// Same path with a different extension.
    pub fn with_extension(&self, extension: &str) -> Self {
        self.derive(Some(extension), "", "")
    }

    /// Check whether the file exists.
    pub fn exists(&self) -> bool {
        self.as_path().exists()
    }

    /// Remove the file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file does not exist or cannot be removed.
    pub fn remove(&self) -> Result<()> {
        std::fs::remove_file(&self.path)?;
        Ok(())
    }
}

impl PartialEq for FilePath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FilePath {}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

/// Extension of a filename, ignoring leading dots (`.bashrc` has none).
fn split_extension(filename: &str) -> &str {
    let stem_start = filename.len() - filename.trim_start_matches('.').len();
    match filename[stem_start..].rfind('.') {
        Some(dot) => &filename[stem_start + dot + 1..],
        None => "",
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }

    out.iter().collect()
}

/// Express the normalized absolute `path` relative to the normalized `base`.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
