use crate::session::Notice;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Normal,
    /// Live search prompt; each keystroke refilters the listing.
    Searching,
    /// Directory chooser prompt.
    ChangingDir,
}

/// Single-line text input used by both prompts.
#[derive(Debug, Default, Clone)]
pub(super) struct PromptInput {
    pub(super) text: String,
    /// Cursor position in chars.
    pub(super) cursor: usize,
}

impl PromptInput {
    pub(super) fn with_text(text: String) -> Self {
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub(super) fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    /// Removes the char before the cursor. Returns whether anything changed.
    pub(super) fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
        true
    }

    pub(super) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Notices from the most recent action, shown in the status area.
#[derive(Debug, Default)]
pub(super) struct StatusLine {
    pub(super) notices: Vec<Notice>,
}

impl StatusLine {
    pub(super) fn replace(&mut self, notices: Vec<Notice>) {
        self.notices = notices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_edits_at_the_cursor() {
        let mut input = PromptInput::with_text("/hme".to_string());
        input.move_left();
        input.move_left();
        input.insert('o');
        assert_eq!(input.text, "/home");
        assert_eq!(input.cursor, 3);

        assert!(input.backspace());
        assert_eq!(input.text, "/hme");
        input.move_right();
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn prompt_handles_multibyte_chars() {
        let mut input = PromptInput::default();
        for c in "résumé".chars() {
            input.insert(c);
        }
        assert!(input.backspace());
        assert_eq!(input.text, "résum");
        assert!(!PromptInput::default().backspace());
    }
}
