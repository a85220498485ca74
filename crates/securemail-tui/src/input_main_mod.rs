use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use securemail_core::Folder;

use super::{App, Mode, apply_input_key, move_cursor_left, move_cursor_right, text_char_len};

impl App {
    /// Returns true when the app should quit.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match self.mode {
            Mode::Main => self.on_key_main(key),
            Mode::Search => {
                self.on_key_search(key);
                false
            }
        }
    }

    pub(crate) fn on_key_main(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('/') => self.enter_search(),
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => self.focus_next(),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => self.focus_prev(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter => self.activate(),
            KeyCode::Esc | KeyCode::Char('x') => self.close_isolated_view(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c.to_digit(10).unwrap_or(1) as usize - 1;
                if let Some(folder) = Folder::from_index(idx) {
                    self.select_folder(folder);
                }
            }
            _ => {}
        }
        false
    }

    /// The query is only edited, never applied to the list.
    pub(crate) fn on_key_search(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.leave_search(),
            KeyCode::Left => move_cursor_left(&self.search_query, &mut self.search_cursor),
            KeyCode::Right => move_cursor_right(&self.search_query, &mut self.search_cursor),
            KeyCode::Home => self.search_cursor = 0,
            KeyCode::End => self.search_cursor = text_char_len(&self.search_query),
            _ => {
                apply_input_key(&mut self.search_query, &mut self.search_cursor, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use securemail_core::{Folder, IsolatedKind};

    use crate::tests::{draw, test_app};

    use super::super::{Focus, Mode};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut app = test_app();
        assert!(app.on_key(press(KeyCode::Char('q'))));
        assert!(app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.on_key(press(KeyCode::Char('j'))));
    }

    #[test]
    fn number_keys_pick_folders() {
        let mut app = test_app();
        app.on_key(press(KeyCode::Char('3')));
        assert_eq!(app.state.folder, Folder::Starred);
        app.on_key(press(KeyCode::Char('4')));
        assert_eq!(app.state.folder, Folder::Trash);
        app.on_key(press(KeyCode::Char('1')));
        assert_eq!(app.state.folder, Folder::Inbox);
    }

    #[test]
    fn search_field_collects_text_without_filtering() {
        let mut app = test_app();
        app.on_key(press(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        for c in "project".chars() {
            app.on_key(press(KeyCode::Char(c)));
        }
        // 'q' is text while searching
        app.on_key(press(KeyCode::Char('q')));
        app.on_key(press(KeyCode::Backspace));
        assert_eq!(app.search_query, "project");

        let text = draw(&mut app).join("\n");
        assert!(text.contains("project"));
        assert!(text.contains("security@company.com"));
        assert!(text.contains("team@project.com"));

        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Main);
        assert_eq!(app.search_query, "project");
    }

    #[test]
    fn keyboard_walkthrough_opens_attachment_preview() {
        let mut app = test_app();
        app.on_key(press(KeyCode::Enter));
        assert_eq!(app.state.selected.as_deref(), Some("1"));
        app.on_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Detail);
        for _ in 0..2 {
            app.on_key(press(KeyCode::Char('j')));
        }
        app.on_key(press(KeyCode::Enter));
        let isolated = app.state.isolated.clone().unwrap();
        assert_eq!(isolated.kind, IsolatedKind::Attachment);
        assert_eq!(isolated.content, "security-report.pdf");

        app.on_key(press(KeyCode::Esc));
        assert!(!app.state.isolated_view);
        assert_eq!(app.state.isolated.as_ref(), Some(&isolated));
    }
}
