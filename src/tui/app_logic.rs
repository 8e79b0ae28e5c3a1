use super::app_state::{AppMode, PromptInput, StatusLine};
use crate::session::{EntryKind, EntryView, Event, Session};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

pub struct TuiApp {
    pub(super) session: Session,
    pub(super) current_selection_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) mode: AppMode,
    pub(super) prompt: PromptInput,
    pub(super) status: StatusLine,
    pub(super) list_viewport_height: usize,
}

impl TuiApp {
    pub fn new(session: Session) -> Self {
        TuiApp {
            session,
            current_selection_idx: 0,
            scroll_offset: 0,
            quit: false,
            mode: AppMode::Normal,
            prompt: PromptInput::default(),
            status: StatusLine::default(),
            list_viewport_height: 0, // Will be updated by ui_renderer
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Applies `event`, shows its notices and keeps the cursor on a valid row.
    pub(super) fn dispatch(&mut self, event: Event) {
        let dir_before = self.session.browse().current_dir.clone();
        let notices = self.session.apply(event);
        if !notices.is_empty() {
            self.status.replace(notices);
        }
        if self.session.browse().current_dir != dir_before {
            self.current_selection_idx = 0;
            self.scroll_offset = 0;
        }
        self.clamp_selection();
    }

    fn row_count(&self) -> usize {
        self.session.entries().len()
    }

    fn current_row(&self) -> Option<EntryView> {
        self.session
            .view()
            .rows
            .into_iter()
            .nth(self.current_selection_idx)
    }

    pub(super) fn clamp_selection(&mut self) {
        let count = self.row_count();
        if count == 0 {
            self.current_selection_idx = 0;
        } else if self.current_selection_idx >= count {
            self.current_selection_idx = count - 1;
        }
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn move_selection(&mut self, delta: i32) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.current_selection_idx =
            (self.current_selection_idx as i32 + delta).rem_euclid(count as i32) as usize;
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        let count = self.row_count();
        let list_height = self.list_viewport_height;
        if count == 0 || list_height == 0 {
            self.scroll_offset = 0;
            return;
        }

        let pos = self.current_selection_idx;
        if pos < self.scroll_offset {
            self.scroll_offset = pos;
        } else if pos >= self.scroll_offset + list_height {
            self.scroll_offset = pos.saturating_sub(list_height - 1);
        }

        if count <= list_height {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(count - list_height);
        }
    }

    /// Enter on a row: open directories, go up on the parent row, toggle files.
    pub(super) fn activate_current_row(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        match row.kind {
            EntryKind::Parent | EntryKind::Directory => self.dispatch(Event::Navigate(row.path)),
            EntryKind::File => {
                let checked = row.checked.unwrap_or(false);
                self.dispatch(Event::ToggleFile(row.path, !checked));
            }
        }
    }

    pub(super) fn toggle_current_file(&mut self) {
        if let Some(EntryView {
            kind: EntryKind::File,
            path,
            checked,
            ..
        }) = self.current_row()
        {
            self.dispatch(Event::ToggleFile(path, !checked.unwrap_or(false)));
        }
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_current_row(),
            KeyCode::Char(' ') => self.toggle_current_file(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.dispatch(Event::GoUp),
            KeyCode::Char('a') => self.dispatch(Event::SelectAllDisplayed),
            KeyCode::Char('d') => self.dispatch(Event::DeselectAllDisplayed),
            KeyCode::Char('x') => self.dispatch(Event::Clear),
            KeyCode::Char('i') => {
                let hide = !self.session.browse().hide_ignored;
                self.dispatch(Event::SetHideIgnored(hide));
            }
            KeyCode::Char('r') => self.dispatch(Event::Refresh),
            KeyCode::Char('y') => self.dispatch(Event::Export),
            KeyCode::Char('/') => {
                self.prompt = PromptInput::with_text(self.session.browse().search.clone());
                self.mode = AppMode::Searching;
            }
            KeyCode::Char('g') => {
                let current = self.session.browse().current_dir.display().to_string();
                self.prompt = PromptInput::with_text(current);
                self.mode = AppMode::ChangingDir;
            }
            _ => {}
        }
    }

    pub(super) fn handle_searching_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.mode = AppMode::Normal,
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.prompt = PromptInput::default();
                self.dispatch(Event::SetSearch(String::new()));
            }
            KeyCode::Char(c) => {
                self.prompt.insert(c);
                self.dispatch(Event::SetSearch(self.prompt.text.clone()));
            }
            KeyCode::Backspace => {
                if self.prompt.backspace() {
                    self.dispatch(Event::SetSearch(self.prompt.text.clone()));
                }
            }
            KeyCode::Left => self.prompt.move_left(),
            KeyCode::Right => self.prompt.move_right(),
            _ => {}
        }
    }

    pub(super) fn handle_changing_dir_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                let requested = std::mem::take(&mut self.prompt).text;
                if !requested.trim().is_empty() {
                    self.dispatch(Event::ChangeDirectory(PathBuf::from(requested.trim())));
                }
            }
            // Cancelled chooser: nothing changes.
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.prompt = PromptInput::default();
            }
            KeyCode::Char(c) => self.prompt.insert(c),
            KeyCode::Backspace => {
                self.prompt.backspace();
            }
            KeyCode::Left => self.prompt.move_left(),
            KeyCode::Right => self.prompt.move_right(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardWriter;
    use crate::tui::event_handler::route_key;
    use crate::error::ClipboardError;
    use crate::file_scanner::default_ignore_patterns;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;

    struct NullClipboard;

    impl ClipboardWriter for NullClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_at(dir: &std::path::Path) -> TuiApp {
        let session = Session::new(
            dir.to_path_buf(),
            default_ignore_patterns(),
            true,
            Box::new(NullClipboard),
        );
        let mut app = TuiApp::new(session);
        app.dispatch(Event::Refresh);
        app
    }

    fn sample_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(temp.path().join("lib.rs"), "").unwrap();
        temp
    }

    #[test]
    fn enter_toggles_files_and_opens_directories() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());

        // Rows: "..", "sub", "lib.rs", "main.rs"
        app.move_selection(2);
        app.handle_normal_mode_input(key(KeyCode::Enter));
        assert!(app.session.selection().is_selected(&temp.path().join("lib.rs")));
        app.handle_normal_mode_input(key(KeyCode::Char(' ')));
        assert!(app.session.selection().is_empty());

        app.move_selection(-1);
        app.handle_normal_mode_input(key(KeyCode::Enter));
        assert_eq!(app.session.browse().current_dir, temp.path().join("sub"));
        assert_eq!(app.current_selection_idx, 0);
    }

    #[test]
    fn space_on_a_directory_does_nothing() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());
        app.move_selection(1);
        app.handle_normal_mode_input(key(KeyCode::Char(' ')));
        assert!(app.session.selection().is_empty());
        assert_eq!(app.session.browse().current_dir, temp.path());
    }

    #[test]
    fn search_prompt_filters_live_and_escape_clears() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());

        app.handle_normal_mode_input(key(KeyCode::Char('/')));
        assert_eq!(app.mode, AppMode::Searching);
        for c in "MAIN".chars() {
            app.handle_searching_mode_input(key(KeyCode::Char(c)));
        }
        assert_eq!(app.session.entries().len(), 3);

        app.handle_searching_mode_input(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.session.entries().len(), 4);
    }

    #[test]
    fn cancelled_directory_prompt_changes_nothing() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());

        app.handle_normal_mode_input(key(KeyCode::Char('g')));
        assert_eq!(app.mode, AppMode::ChangingDir);
        app.handle_changing_dir_mode_input(key(KeyCode::Char('x')));
        app.handle_changing_dir_mode_input(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.session.browse().current_dir, temp.path());
    }

    #[test]
    fn directory_prompt_navigates_on_enter() {
        let temp = sample_dir();
        let root = temp.path().canonicalize().unwrap();
        let mut app = app_at(&root);

        app.handle_normal_mode_input(key(KeyCode::Char('g')));
        for c in "/sub".chars() {
            app.handle_changing_dir_mode_input(key(KeyCode::Char(c)));
        }
        app.handle_changing_dir_mode_input(key(KeyCode::Enter));
        assert_eq!(app.session.browse().current_dir, root.join("sub"));
    }

    #[test]
    fn ctrl_c_quits_even_inside_a_prompt() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());

        app.handle_normal_mode_input(key(KeyCode::Char('/')));
        route_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.quit);
        assert!(app.session.browse().search.is_empty());
    }

    #[test]
    fn selection_wraps_and_scrolls_into_view() {
        let temp = sample_dir();
        let mut app = app_at(temp.path());
        app.list_viewport_height = 2;

        app.move_selection(-1);
        assert_eq!(app.current_selection_idx, 3);
        assert_eq!(app.scroll_offset, 2);
        app.move_selection(1);
        assert_eq!(app.current_selection_idx, 0);
        assert_eq!(app.scroll_offset, 0);
    }
}
