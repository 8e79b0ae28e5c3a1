//! Error types shared by the browser, export and clipboard layers.

use std::path::PathBuf;

/// Failure to list a directory.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The directory exists but cannot be opened for reading.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other listing failure (missing directory, not a directory, ...).
    #[error("cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ListError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Self::PermissionDenied { path } | Self::Io { path, .. } => path,
        }
    }
}

/// A single file that could not be read during an export. Collected, never fatal.
#[derive(Debug)]
pub struct FileReadWarning {
    pub path: PathBuf,
    pub cause: std::io::Error,
}

impl std::fmt::Display for FileReadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not read {}: {}", self.path.display(), self.cause)
    }
}

/// Export outcomes that produce no text. Both are informational for the user.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no files have been selected in any directory")]
    EmptySelection,

    #[error("no readable content found in {} selected file(s)", warnings.len())]
    NoReadableContent { warnings: Vec<FileReadWarning> },
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),

    #[error("clipboard helper failed: {0}")]
    Helper(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn permission_errors_are_classified() {
        let err = ListError::from_io("/root/secret", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ListError::PermissionDenied { .. }));
        assert_eq!(err.path(), &PathBuf::from("/root/secret"));

        let err = ListError::from_io("/nope", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ListError::Io { .. }));
    }

    #[test]
    fn messages_name_the_path() {
        let err = ListError::PermissionDenied {
            path: PathBuf::from("/srv/locked"),
        };
        assert_eq!(err.to_string(), "permission denied: /srv/locked");

        let warning = FileReadWarning {
            path: PathBuf::from("/tmp/gone.rs"),
            cause: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(warning.to_string(), "could not read /tmp/gone.rs: not found");
    }
}
