use securemail_core::{DetailAction, Folder, Message, detail_actions, log_debug};

use super::{App, Focus, Mode};

impl App {
    pub(crate) fn visible_messages(&self) -> &[Message] {
        self.mailbox.messages_in(self.state.folder)
    }

    pub(crate) fn selected_message(&self) -> Option<&Message> {
        self.state.selected_message(&self.mailbox)
    }

    /// Actions of the normal detail panel; empty while the isolated view is up.
    pub(crate) fn current_actions(&self) -> Vec<DetailAction> {
        if self.state.isolated_view {
            return Vec::new();
        }
        self.selected_message()
            .map(detail_actions)
            .unwrap_or_default()
    }

    fn detail_visible(&self) -> bool {
        self.selected_message().is_some()
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Folders => Focus::Messages,
            Focus::Messages if self.detail_visible() => Focus::Detail,
            Focus::Messages | Focus::Detail => Focus::Folders,
        };
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Folders if self.detail_visible() => Focus::Detail,
            Focus::Folders => Focus::Messages,
            Focus::Messages => Focus::Folders,
            Focus::Detail => Focus::Messages,
        };
    }

    pub(crate) fn select_folder(&mut self, folder: Folder) {
        if self.state.folder != folder {
            log_debug(&format!("folder selected {}", folder.id()));
        }
        self.state.select_folder(folder);
    }

    pub(crate) fn select_message_at(&mut self, index: usize) {
        let Some(id) = self.visible_messages().get(index).map(|m| m.id.clone()) else {
            return;
        };
        self.message_index = index;
        let previous = self.state.selected.clone();
        if self.state.select_message(&self.mailbox, &id)
            && previous.as_deref() != Some(id.as_str())
        {
            self.action_index = 0;
            self.detail_scroll = 0;
            log_debug(&format!("message selected id={}", id));
        }
    }

    pub(crate) fn trigger_action(&mut self, index: usize) {
        let actions = self.current_actions();
        let Some(action) = actions.get(index) else {
            return;
        };
        self.action_index = index;
        self.state.apply_action(action);
        log_debug(&format!("isolated view opened via '{}'", action.label()));
    }

    pub(crate) fn close_isolated_view(&mut self) {
        if self.state.isolated_view {
            self.state.close_isolated();
            log_debug("isolated view closed");
        }
    }

    pub(crate) fn move_down(&mut self) {
        match self.focus {
            Focus::Folders => {
                if let Some(next) = Folder::from_index(self.state.folder.index() + 1) {
                    self.select_folder(next);
                }
            }
            Focus::Messages => {
                if self.message_index + 1 < self.visible_messages().len() {
                    self.message_index += 1;
                }
            }
            Focus::Detail => {
                let count = self.current_actions().len();
                if count > 0 {
                    if self.action_index + 1 < count {
                        self.action_index += 1;
                    }
                } else {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                }
            }
        }
    }

    pub(crate) fn move_up(&mut self) {
        match self.focus {
            Focus::Folders => {
                let idx = self.state.folder.index();
                if idx > 0 {
                    if let Some(prev) = Folder::from_index(idx - 1) {
                        self.select_folder(prev);
                    }
                }
            }
            Focus::Messages => {
                self.message_index = self.message_index.saturating_sub(1);
            }
            Focus::Detail => {
                if self.current_actions().is_empty() {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else {
                    self.action_index = self.action_index.saturating_sub(1);
                }
            }
        }
    }

    pub(crate) fn activate(&mut self) {
        match self.focus {
            Focus::Folders => {}
            Focus::Messages => self.select_message_at(self.message_index),
            Focus::Detail => {
                if self.state.isolated_view {
                    self.close_isolated_view();
                } else {
                    self.trigger_action(self.action_index);
                }
            }
        }
    }

    pub(crate) fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.search_cursor = self.search_cursor.min(self.search_query.chars().count());
    }

    pub(crate) fn leave_search(&mut self) {
        self.mode = Mode::Main;
    }
}
