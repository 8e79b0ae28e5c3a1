use crate::error::ListError;
use crate::utils::cmp_case_insensitive;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Names hidden when "hide ignored" is on, unless the config replaces them.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    ".vscode",
    ".idea",
    "node_modules",
    ".DS_Store",
];

pub fn default_ignore_patterns() -> HashSet<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEntry {
    /// Synthetic "go up" row. Never produced for the filesystem root.
    Parent { path: PathBuf },
    Directory { name: String, path: PathBuf },
    File { name: String, path: PathBuf },
}

impl DirectoryEntry {
    pub fn display_name(&self) -> &str {
        match self {
            DirectoryEntry::Parent { .. } => "..",
            DirectoryEntry::Directory { name, .. } | DirectoryEntry::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DirectoryEntry::Parent { path }
            | DirectoryEntry::Directory { path, .. }
            | DirectoryEntry::File { path, .. } => path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, DirectoryEntry::File { .. })
    }
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    /// Lossy UTF-8 rendering, for display and matching only.
    pub name: String,
    /// The real on-disk path, exact even when the name is not valid UTF-8.
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Raw one-level read of `path`: every directory or regular file child.
/// Symlinks are followed for classification.
pub fn read_directory(path: &Path) -> Result<Vec<ChildEntry>, ListError> {
    let metadata = fs::metadata(path).map_err(|e| ListError::from_io(path, e))?;
    if !metadata.is_dir() {
        return Err(ListError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut children = Vec::new();

    for result in WalkDir::new(path).min_depth(1).max_depth(1) {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                // Depth 0 means `path` itself could not be opened.
                if e.depth() == 0 {
                    let failed = e.path().unwrap_or(path).to_path_buf();
                    return Err(match e.into_io_error() {
                        Some(io_err) => ListError::from_io(failed, io_err),
                        None => ListError::Io {
                            path: failed,
                            source: io::Error::other("filesystem loop"),
                        },
                    });
                }
                tracing::debug!("Skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };

        let child = dirent.path();
        let is_dir = if child.is_dir() {
            true
        } else if child.is_file() {
            false
        } else {
            continue;
        };
        children.push(ChildEntry {
            name: dirent.file_name().to_string_lossy().into_owned(),
            path: child.to_path_buf(),
            is_dir,
        });
    }

    Ok(children)
}

/// Lists `path` as the ordered rows the browser shows: parent, directories, files.
pub fn list_entries(
    path: &Path,
    ignore_patterns: &HashSet<String>,
    hide_ignored: bool,
    search_term: &str,
) -> Result<Vec<DirectoryEntry>, ListError> {
    let children = read_directory(path)?;

    let (mut dirs, mut files): (Vec<_>, Vec<_>) = children
        .into_iter()
        .filter(|child| !(hide_ignored && ignore_patterns.contains(&child.name)))
        .partition(|child| child.is_dir);

    dirs.sort_by(|a, b| cmp_case_insensitive(&a.name, &b.name));
    files.sort_by(|a, b| cmp_case_insensitive(&a.name, &b.name));

    let needle = search_term.to_lowercase();
    if !needle.is_empty() {
        files.retain(|child| child.name.to_lowercase().contains(&needle));
    }

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if !is_root(path) {
        entries.push(DirectoryEntry::Parent {
            path: go_up(path),
        });
    }
    entries.extend(dirs.into_iter().map(|child| DirectoryEntry::Directory {
        name: child.name,
        path: child.path,
    }));
    entries.extend(files.into_iter().map(|child| DirectoryEntry::File {
        name: child.name,
        path: child.path,
    }));

    Ok(entries)
}

pub fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

/// Parent of `path`; the root maps to itself.
pub fn go_up(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

pub fn go_into(path: &Path, child_name: &str) -> PathBuf {
    path.join(child_name)
}

/// Lists `target`, ascending once to its parent when `target` is unreadable.
///
/// Returns the directory that was actually listed together with its entries.
/// A second permission failure, or any other listing error, is handed back.
pub fn load_with_fallback<F>(
    target: &Path,
    mut list: F,
) -> Result<(PathBuf, Vec<DirectoryEntry>), ListError>
where
    F: FnMut(&Path) -> Result<Vec<DirectoryEntry>, ListError>,
{
    match list(target) {
        Ok(entries) => Ok((target.to_path_buf(), entries)),
        Err(ListError::PermissionDenied { path }) if !is_root(target) => {
            let parent = go_up(target);
            tracing::warn!(
                "Permission denied for {}, falling back to {}",
                path.display(),
                parent.display()
            );
            let entries = list(&parent)?;
            Ok((parent, entries))
        }
        Err(e) => Err(e),
    }
}
