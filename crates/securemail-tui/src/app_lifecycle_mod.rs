use securemail_core::{IsolatedScope, Mailbox, ViewerState};

use super::{App, DEFAULT_SIDEBAR_WIDTH, Focus, Mode, UiTheme};

impl App {
    pub(crate) fn new(
        mailbox: Mailbox,
        isolated_scope: IsolatedScope,
        sidebar_width: u16,
        ui_theme_name: String,
        ui_theme: UiTheme,
    ) -> Self {
        Self {
            mode: Mode::Main,
            focus: Focus::Messages,
            mailbox,
            state: ViewerState::new(isolated_scope),
            message_index: 0,
            list_scroll: 0,
            action_index: 0,
            detail_scroll: 0,
            search_query: String::new(),
            search_cursor: 0,
            show_help: false,
            sidebar_width: if sidebar_width == 0 {
                DEFAULT_SIDEBAR_WIDTH
            } else {
                sidebar_width
            },
            ui_theme_name,
            ui_theme,
            hits: Vec::new(),
        }
    }

    pub(crate) fn theme_name(&self) -> &str {
        &self.ui_theme_name
    }
}

#[cfg(test)]
mod tests {
    use securemail_core::{Folder, IsolatedScope, Mailbox};

    use super::super::{App, DEFAULT_SIDEBAR_WIDTH, Focus, Mode, UiTheme};

    #[test]
    fn new_app_starts_on_inbox_with_nothing_selected() {
        let app = App::new(
            Mailbox::seed(),
            IsolatedScope::Message,
            0,
            "nord".to_string(),
            UiTheme::from_name("nord"),
        );
        assert_eq!(app.mode, Mode::Main);
        assert_eq!(app.focus, Focus::Messages);
        assert_eq!(app.state.folder, Folder::Inbox);
        assert!(app.state.selected.is_none());
        assert!(!app.state.isolated_view);
        assert_eq!(app.state.scope, IsolatedScope::Message);
        assert_eq!(app.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
        assert_eq!(app.theme_name(), "nord");
    }
}
