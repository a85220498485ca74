use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::{App, Focus, HitTarget, Mode};

impl App {
    pub(crate) fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_click(mouse.column, mouse.row),
            // Folders change only on click or key, never on the wheel.
            MouseEventKind::ScrollDown if self.focus != Focus::Folders => self.move_down(),
            MouseEventKind::ScrollUp if self.focus != Focus::Folders => self.move_up(),
            _ => {}
        }
    }

    /// Last region drawn wins, so panels drawn later shadow earlier ones.
    pub(crate) fn hit_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hits
            .iter()
            .rev()
            .find(|hit| {
                let area = hit.area;
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|hit| hit.target)
    }

    pub(crate) fn on_click(&mut self, column: u16, row: u16) {
        let Some(target) = self.hit_at(column, row) else {
            return;
        };
        if self.mode == Mode::Search && target != HitTarget::Search {
            self.leave_search();
        }
        match target {
            HitTarget::Folder(folder) => {
                self.focus = Focus::Folders;
                self.select_folder(folder);
            }
            HitTarget::Message(index) => {
                self.focus = Focus::Messages;
                self.select_message_at(index);
            }
            HitTarget::Action(index) => {
                self.focus = Focus::Detail;
                self.trigger_action(index);
            }
            HitTarget::CloseIsolated => {
                self.focus = Focus::Detail;
                self.close_isolated_view();
            }
            HitTarget::Search => self.enter_search(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use securemail_core::{Folder, IsolatedKind};

    use crate::tests::{draw, test_app};

    use super::super::{App, Focus, HitTarget, Mode};

    fn click_target(app: &mut App, target: HitTarget) {
        draw(app);
        let hit = app
            .hits
            .iter()
            .find(|hit| hit.target == target)
            .copied()
            .unwrap_or_else(|| panic!("no hit region for {:?}", target));
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: hit.area.x,
            row: hit.area.y,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn clicking_a_folder_selects_it() {
        let mut app = test_app();
        click_target(&mut app, HitTarget::Folder(Folder::Sent));
        assert_eq!(app.state.folder, Folder::Sent);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("security@company.com"));
        assert!(text.contains("team@project.com"));
    }

    #[test]
    fn clicking_view_safely_then_close() {
        let mut app = test_app();
        click_target(&mut app, HitTarget::Message(0));
        assert_eq!(app.state.selected.as_deref(), Some("1"));

        click_target(&mut app, HitTarget::Action(1));
        assert!(app.state.isolated_view);
        let isolated = app.state.isolated.clone().unwrap();
        assert_eq!(isolated.kind, IsolatedKind::Url);
        assert_eq!(isolated.content, "https://update.example.com");

        click_target(&mut app, HitTarget::CloseIsolated);
        assert!(!app.state.isolated_view);
    }

    #[test]
    fn switching_messages_keeps_isolated_view_by_default() {
        let mut app = test_app();
        click_target(&mut app, HitTarget::Message(0));
        click_target(&mut app, HitTarget::Action(0));
        click_target(&mut app, HitTarget::Message(1));
        assert_eq!(app.state.selected.as_deref(), Some("2"));
        assert!(app.state.isolated_view);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("https://security-report.example.com"));
    }

    #[test]
    fn clicking_outside_search_leaves_search_mode() {
        let mut app = test_app();
        click_target(&mut app, HitTarget::Search);
        assert_eq!(app.mode, Mode::Search);
        click_target(&mut app, HitTarget::Message(1));
        assert_eq!(app.mode, Mode::Main);
        assert_eq!(app.state.selected.as_deref(), Some("2"));
    }

    fn scroll(app: &mut App, kind: MouseEventKind) {
        app.on_mouse(MouseEvent {
            kind,
            column: 60,
            row: 10,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn wheel_moves_the_list_but_not_the_folders() {
        let mut app = test_app();
        click_target(&mut app, HitTarget::Folder(Folder::Sent));
        scroll(&mut app, MouseEventKind::ScrollDown);
        scroll(&mut app, MouseEventKind::ScrollDown);
        assert_eq!(app.state.folder, Folder::Sent);
        scroll(&mut app, MouseEventKind::ScrollUp);
        assert_eq!(app.state.folder, Folder::Sent);

        app.focus = Focus::Messages;
        scroll(&mut app, MouseEventKind::ScrollDown);
        assert_eq!(app.message_index, 1);
        scroll(&mut app, MouseEventKind::ScrollUp);
        assert_eq!(app.message_index, 0);
    }

    #[test]
    fn clicks_on_empty_space_do_nothing() {
        let mut app = test_app();
        draw(&mut app);
        assert_eq!(app.hit_at(119, 39), None);
        app.on_click(119, 39);
        assert!(app.state.selected.is_none());
    }
}
