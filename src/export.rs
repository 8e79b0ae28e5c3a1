use crate::error::{ExportError, FileReadWarning};
use crate::selection::SelectionSet;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub struct ExportOutput {
    pub text: String,
    /// Number of files whose content made it into `text`.
    pub files: usize,
    pub warnings: Vec<FileReadWarning>,
}

pub fn format_header(path: &Path) -> String {
    format!("# --- File: {} ---", path.display())
}

/// Reads a whole file as text, dropping any bytes that are not valid UTF-8.
pub fn read_file_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Ok(text)
}

/// Concatenates every selected file in snapshot order, each behind a path header.
///
/// Unreadable files are skipped and reported in `warnings`; they never abort the
/// export as long as at least one file could be read.
pub fn export(selection: &SelectionSet) -> Result<ExportOutput, ExportError> {
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let mut text = String::new();
    let mut files = 0;
    let mut warnings = Vec::new();

    for path in selection.snapshot() {
        match read_file_text(&path) {
            Ok(contents) => {
                text.push_str("\n\n");
                text.push_str(&format_header(&path));
                text.push_str("\n\n");
                text.push_str(&contents);
                files += 1;
            }
            Err(cause) => {
                tracing::warn!("Skipping {} during export: {}", path.display(), cause);
                warnings.push(FileReadWarning { path, cause });
            }
        }
    }

    if files == 0 {
        return Err(ExportError::NoReadableContent { warnings });
    }

    Ok(ExportOutput {
        text,
        files,
        warnings,
    })
}
