//! Browsing session: the browse state, the current listing and the
//! cross-directory selection, driven by a single event handler.

use crate::clipboard::ClipboardWriter;
use crate::error::ExportError;
use crate::export::export;
use crate::file_scanner::{DirectoryEntry, go_up, list_entries, load_with_fallback};
use crate::selection::SelectionSet;
use crate::utils::approx_tokens;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub current_dir: PathBuf,
    pub search: String,
    pub hide_ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a directory from the listing (child or parent row).
    Navigate(PathBuf),
    GoUp,
    /// Result of the directory chooser. May be relative or start with `~`.
    ChangeDirectory(PathBuf),
    ToggleFile(PathBuf, bool),
    SelectAllDisplayed,
    DeselectAllDisplayed,
    Clear,
    SetSearch(String),
    SetHideIgnored(bool),
    Refresh,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub kind: EntryKind,
    pub label: String,
    pub path: PathBuf,
    /// `Some` for files only.
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub current_dir: String,
    pub hide_ignored: bool,
    pub search: String,
    pub selected_count: usize,
    pub rows: Vec<EntryView>,
}

pub struct Session {
    browse: BrowseState,
    ignore_patterns: HashSet<String>,
    entries: Vec<DirectoryEntry>,
    selection: SelectionSet,
    clipboard: Box<dyn ClipboardWriter>,
    pending_output: Option<String>,
}

impl Session {
    /// Creates a session positioned at `start_dir`. Nothing is listed until the
    /// first `Event::Refresh`.
    pub fn new(
        start_dir: PathBuf,
        ignore_patterns: HashSet<String>,
        hide_ignored: bool,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            browse: BrowseState {
                current_dir: start_dir,
                search: String::new(),
                hide_ignored,
            },
            ignore_patterns,
            entries: Vec::new(),
            selection: SelectionSet::new(),
            clipboard,
            pending_output: None,
        }
    }

    pub fn browse(&self) -> &BrowseState {
        &self.browse
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Export text whose clipboard write failed, for printing once the UI is gone.
    pub fn take_pending_output(&mut self) -> Option<String> {
        self.pending_output.take()
    }

    pub fn apply(&mut self, event: Event) -> Vec<Notice> {
        match event {
            Event::Navigate(path) => self.navigate_to(path),
            Event::GoUp => {
                let parent = go_up(&self.browse.current_dir);
                if parent == self.browse.current_dir {
                    Vec::new()
                } else {
                    self.navigate_to(parent)
                }
            }
            Event::ChangeDirectory(path) => self.change_directory(&path),
            Event::ToggleFile(path, checked) => {
                self.selection.toggle(&path, checked);
                Vec::new()
            }
            Event::SelectAllDisplayed => {
                let displayed = displayed_files(&self.entries);
                self.selection.select_all(displayed);
                Vec::new()
            }
            Event::DeselectAllDisplayed => {
                let displayed = displayed_files(&self.entries);
                self.selection.deselect_all(displayed);
                Vec::new()
            }
            Event::Clear => {
                self.selection.clear();
                vec![Notice::Info("Selection cleared.".to_string())]
            }
            Event::SetSearch(term) => {
                let previous = self.browse.clone();
                self.browse.search = term;
                self.relist_or_restore(previous)
            }
            Event::SetHideIgnored(hide) => {
                let previous = self.browse.clone();
                self.browse.hide_ignored = hide;
                self.relist_or_restore(previous)
            }
            Event::Refresh => self.refresh(),
            Event::Export => self.export_selection(),
        }
    }

    pub fn view(&self) -> ViewModel {
        let rows = self
            .entries
            .iter()
            .map(|entry| match entry {
                DirectoryEntry::Parent { path } => EntryView {
                    kind: EntryKind::Parent,
                    label: "[ .. ] Go Up".to_string(),
                    path: path.clone(),
                    checked: None,
                },
                DirectoryEntry::Directory { name, path } => EntryView {
                    kind: EntryKind::Directory,
                    label: format!("[ {} ]", name),
                    path: path.clone(),
                    checked: None,
                },
                DirectoryEntry::File { name, path } => EntryView {
                    kind: EntryKind::File,
                    label: name.clone(),
                    path: path.clone(),
                    checked: Some(self.selection.is_selected(path)),
                },
            })
            .collect();

        ViewModel {
            current_dir: self.browse.current_dir.display().to_string(),
            hide_ignored: self.browse.hide_ignored,
            search: self.browse.search.clone(),
            selected_count: self.selection.count(),
            rows,
        }
    }

    fn refresh(&mut self) -> Vec<Notice> {
        let current = self.browse.current_dir.clone();
        self.navigate_to(current)
    }

    /// Relists the current directory under the new filters, putting the old
    /// browse state back if the listing fails so the view stays consistent.
    fn relist_or_restore(&mut self, previous: BrowseState) -> Vec<Notice> {
        let current = self.browse.current_dir.clone();
        match self.try_navigate(current) {
            Ok(notices) => notices,
            Err(notice) => {
                self.browse = previous;
                vec![notice]
            }
        }
    }

    fn navigate_to(&mut self, target: PathBuf) -> Vec<Notice> {
        self.try_navigate(target)
            .unwrap_or_else(|notice| vec![notice])
    }

    fn try_navigate(&mut self, target: PathBuf) -> Result<Vec<Notice>, Notice> {
        let ignore = &self.ignore_patterns;
        let hide = self.browse.hide_ignored;
        let search = self.browse.search.as_str();

        match load_with_fallback(&target, |p| list_entries(p, ignore, hide, search)) {
            Ok((listed, entries)) => {
                let mut notices = Vec::new();
                if listed != target {
                    notices.push(Notice::Warning(format!(
                        "Permission denied: cannot access {}. Showing its parent directory.",
                        target.display()
                    )));
                }
                tracing::debug!("Listed {} ({} entries)", listed.display(), entries.len());
                self.browse.current_dir = listed;
                self.entries = entries;
                Ok(notices)
            }
            Err(e) => {
                tracing::error!("Listing {} failed: {}", target.display(), e);
                Err(Notice::Error(format!("Cannot open directory: {}", e)))
            }
        }
    }

    fn change_directory(&mut self, requested: &Path) -> Vec<Notice> {
        let resolved = resolve_user_path(requested, &self.browse.current_dir);
        match resolved.canonicalize() {
            Ok(dir) if dir.is_dir() => self.navigate_to(dir),
            Ok(other) => vec![Notice::Error(format!(
                "Not a directory: {}",
                other.display()
            ))],
            Err(e) => vec![Notice::Error(format!(
                "Cannot open {}: {}",
                resolved.display(),
                e
            ))],
        }
    }

    fn export_selection(&mut self) -> Vec<Notice> {
        match export(&self.selection) {
            Err(ExportError::EmptySelection) => vec![Notice::Info(
                "No files have been selected in any directory to copy.".to_string(),
            )],
            Err(ExportError::NoReadableContent { warnings }) => {
                let mut notices = vec![Notice::Info(
                    "No readable content found in the selected files.".to_string(),
                )];
                notices.extend(
                    warnings
                        .iter()
                        .map(|w| Notice::Warning(format!("{} (skipped)", w))),
                );
                notices
            }
            Ok(output) => {
                let mut notices = Vec::with_capacity(output.warnings.len() + 1);
                match self.clipboard.write_text(&output.text) {
                    Ok(()) => {
                        self.pending_output = None;
                        notices.push(Notice::Info(format!(
                            "Copied {} file(s) (≈ {} tokens) to the clipboard.",
                            output.files,
                            approx_tokens(&output.text)
                        )));
                    }
                    Err(e) => {
                        tracing::error!("Clipboard write failed: {}", e);
                        self.pending_output = Some(output.text);
                        notices.push(Notice::Error(format!(
                            "Could not copy to clipboard ({}). The text will be printed when you quit.",
                            e
                        )));
                    }
                }
                notices.extend(
                    output
                        .warnings
                        .iter()
                        .map(|w| Notice::Warning(format!("{} (skipped)", w))),
                );
                notices
            }
        }
    }
}

fn displayed_files(entries: &[DirectoryEntry]) -> Vec<&Path> {
    entries
        .iter()
        .filter(|e| e.is_file())
        .map(DirectoryEntry::path)
        .collect()
}

/// Expands a leading `~` and anchors relative paths at `base`.
pub fn resolve_user_path(requested: &Path, base: &Path) -> PathBuf {
    let expanded = match requested.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => requested.to_path_buf(),
        },
        Err(_) => requested.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
