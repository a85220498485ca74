use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};
use securemail_core::{DetailPanel, IsolatedContent, Message};
use unicode_width::UnicodeWidthStr;

use super::{App, Focus, HitRegion, HitTarget, Mode, UiTheme, truncate_label, wrap_text};

const ISOLATED_TITLE: &str = "Isolated Content Viewer";
const ISOLATED_NOTICE: &str = "Content is being displayed in an isolated environment";
const CLOSE_LABEL: &str = "[x] Close";

enum PanelView {
    Normal(Message),
    Isolated(Option<IsolatedContent>),
}

/// Pre-wrapped lines of the normal panel plus the row each action sits on.
struct NormalLayout {
    lines: Vec<Line<'static>>,
    action_rows: Vec<(usize, u16)>,
}

pub(crate) fn render_detail(frame: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .style(app.ui_theme.base)
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let view = match app.state.detail_panel(&app.mailbox) {
        DetailPanel::Hidden => return,
        DetailPanel::Normal(message) => PanelView::Normal(message.clone()),
        DetailPanel::Isolated(content) => PanelView::Isolated(content.cloned()),
    };
    match view {
        PanelView::Normal(message) => render_normal(frame, inner, app, &message),
        PanelView::Isolated(content) => render_isolated(frame, inner, app, content.as_ref()),
    }
}

fn render_normal(frame: &mut ratatui::Frame, area: Rect, app: &mut App, message: &Message) {
    let focused = app.focus == Focus::Detail && app.mode == Mode::Main;
    let selected_action = focused.then_some(app.action_index);
    let layout = normal_layout(message, area.width as usize, &app.ui_theme, selected_action);

    if let Some((_, row)) = layout
        .action_rows
        .iter()
        .find(|(idx, _)| Some(*idx) == selected_action)
    {
        if *row < app.detail_scroll {
            app.detail_scroll = *row;
        } else if *row >= app.detail_scroll + area.height {
            app.detail_scroll = *row + 1 - area.height;
        }
    }
    let max_scroll = (layout.lines.len() as u16).saturating_sub(area.height);
    app.detail_scroll = app.detail_scroll.min(max_scroll);
    let scroll = app.detail_scroll;

    for (idx, row) in &layout.action_rows {
        if *row < scroll || *row - scroll >= area.height {
            continue;
        }
        let label_width = action_label(message, *idx).width() as u16;
        app.hits.push(HitRegion {
            area: Rect {
                x: area.x + area.width.saturating_sub(label_width),
                y: area.y + (*row - scroll),
                width: label_width.min(area.width),
                height: 1,
            },
            target: HitTarget::Action(*idx),
        });
    }

    frame.render_widget(
        Paragraph::new(layout.lines)
            .style(app.ui_theme.base)
            .scroll((scroll, 0)),
        area,
    );
}

fn action_label(message: &Message, index: usize) -> String {
    if index < message.urls.len() {
        "[View Safely]".to_string()
    } else {
        "[Preview Safely]".to_string()
    }
}

fn normal_layout(
    message: &Message,
    width: usize,
    theme: &UiTheme,
    selected_action: Option<usize>,
) -> NormalLayout {
    let mut lines = Vec::new();
    let mut action_rows = Vec::new();
    let heading = theme.title.add_modifier(Modifier::BOLD);

    for part in wrap_text(&message.subject, width) {
        lines.push(Line::from(Span::styled(part, heading)));
    }
    lines.push(Line::from(vec![
        Span::styled(
            message.from.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" • ", theme.muted),
        Span::styled(message.date.clone(), theme.muted),
    ]));
    lines.push(Line::from(""));
    for part in wrap_text(&message.body, width) {
        lines.push(Line::from(part));
    }

    let action_style = |idx: usize| {
        if selected_action == Some(idx) {
            theme.action_selected
        } else {
            theme.action
        }
    };

    if !message.urls.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("URLs", heading)));
        for (idx, url) in message.urls.iter().enumerate() {
            action_rows.push((idx, lines.len() as u16));
            lines.push(action_row(
                url,
                theme.link,
                &action_label(message, idx),
                action_style(idx),
                width,
            ));
        }
    }

    if !message.attachments.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Attachments", heading)));
        for (offset, attachment) in message.attachments.iter().enumerate() {
            let idx = message.urls.len() + offset;
            action_rows.push((idx, lines.len() as u16));
            lines.push(action_row(
                &attachment.name,
                Style::default().add_modifier(Modifier::BOLD),
                &action_label(message, idx),
                action_style(idx),
                width,
            ));
            lines.push(Line::from(Span::styled(
                format!("  {}", attachment.size),
                theme.muted,
            )));
        }
    }

    NormalLayout { lines, action_rows }
}

/// `left` padded so that `label` ends on the last column.
fn action_row(
    left: &str,
    left_style: Style,
    label: &str,
    label_style: Style,
    width: usize,
) -> Line<'static> {
    let label_width = label.width();
    let avail = width.saturating_sub(label_width + 3);
    let left = truncate_label(left, avail);
    let pad = width.saturating_sub(2 + left.width() + label_width);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(left, left_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(label.to_string(), label_style),
    ])
}

fn render_isolated(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &mut App,
    content: Option<&IsolatedContent>,
) {
    let theme = &app.ui_theme;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    let focused = app.focus == Focus::Detail && app.mode == Mode::Main;
    let close_style = if focused {
        theme.action_selected
    } else {
        theme.action
    };
    let header = action_row(
        ISOLATED_TITLE,
        theme.title.add_modifier(Modifier::BOLD),
        CLOSE_LABEL,
        close_style,
        rows[0].width as usize,
    );
    frame.render_widget(Paragraph::new(header), rows[0]);
    let close_width = (CLOSE_LABEL.width() as u16).min(rows[0].width);
    let close_area = Rect {
        x: rows[0].x + rows[0].width - close_width,
        y: rows[0].y,
        width: close_width,
        height: 1,
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(theme.base)
        .padding(Padding::horizontal(1));
    let boxed = outer.inner(rows[2]);
    frame.render_widget(outer, rows[2]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(boxed);
    let notice = Line::from(vec![
        Span::styled("◆ ", theme.secure),
        Span::styled(ISOLATED_NOTICE, theme.muted),
    ]);
    frame.render_widget(
        Paragraph::new(notice).wrap(Wrap { trim: true }),
        parts[0],
    );

    if let Some(content) = content {
        frame.render_widget(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border),
            parts[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                content.kind.heading(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            parts[2],
        );
        // Shown as text only; nothing is fetched or opened.
        let code = Paragraph::new(content.content.clone())
            .style(theme.code)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border)
                    .style(theme.code)
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(code, parts[3]);
    }

    app.hits.push(HitRegion {
        area: close_area,
        target: HitTarget::CloseIsolated,
    });
}

#[cfg(test)]
mod tests {
    use securemail_core::{IsolatedScope, Mailbox, Message};

    use crate::tests::{draw, test_app};

    use super::super::{App, Focus, HitTarget, UiTheme};

    fn row_with<'a>(lines: &'a [String], needle: &str) -> Option<&'a String> {
        lines.iter().find(|line| line.contains(needle))
    }

    #[test]
    fn normal_panel_shows_message_fields_and_sections() {
        let mut app = test_app();
        app.select_message_at(0);
        let lines = draw(&mut app);
        let text = lines.join("\n");
        assert!(text.contains("security@company.com • 10:30 AM"));
        assert!(text.contains("Please review the security report and attached documents"));
        assert!(text.contains("URLs"));
        assert!(text.contains("Attachments"));
        assert_eq!(lines.iter().filter(|l| l.contains("[View Safely]")).count(), 2);
        assert_eq!(
            lines.iter().filter(|l| l.contains("[Preview Safely]")).count(),
            2
        );
        assert!(row_with(&lines, "update-instructions.docx").is_some());
        assert!(row_with(&lines, "1.1 MB").is_some());
    }

    #[test]
    fn second_message_lists_one_url_and_one_attachment() {
        let mut app = test_app();
        app.select_message_at(1);
        let lines = draw(&mut app);
        assert_eq!(lines.iter().filter(|l| l.contains("[View Safely]")).count(), 1);
        assert_eq!(
            lines.iter().filter(|l| l.contains("[Preview Safely]")).count(),
            1
        );
        let attachment_row = row_with(&lines, "[Preview Safely]").unwrap();
        assert!(attachment_row.contains("timeline-v2.xlsx"));
        let size_row = lines
            .iter()
            .position(|l| l.contains("timeline-v2.xlsx"))
            .map(|idx| &lines[idx + 1])
            .unwrap();
        assert!(size_row.contains("856 KB"));
        assert!(row_with(&lines, "https://project-timeline.example.com").is_some());
    }

    #[test]
    fn empty_sections_are_not_rendered() {
        let message = Message {
            id: "solo".to_string(),
            from: "nobody@example.com".to_string(),
            subject: "No links here".to_string(),
            preview: "plain".to_string(),
            date: "Mon".to_string(),
            read: true,
            starred: false,
            body: "Just text.".to_string(),
            urls: Vec::new(),
            attachments: Vec::new(),
        };
        let mut app = App::new(
            Mailbox::new(vec![message]).unwrap(),
            IsolatedScope::Global,
            22,
            "default".to_string(),
            UiTheme::default_theme(),
        );
        app.select_message_at(0);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("Just text."));
        assert!(!text.contains("URLs"));
        assert!(!text.contains("Attachments"));
        assert!(!text.contains("Safely"));
    }

    #[test]
    fn view_safely_renders_url_verbatim_under_url_preview() {
        let mut app = test_app();
        app.select_message_at(0);
        draw(&mut app);
        app.trigger_action(1);
        let lines = draw(&mut app);
        let text = lines.join("\n");
        assert!(text.contains("Isolated Content Viewer"));
        assert!(text.contains("Content is being displayed in an isolated environment"));
        assert!(text.contains("URL Preview"));
        assert!(!text.contains("File Preview"));
        assert!(row_with(&lines, "https://update.example.com").is_some());
        assert!(!text.contains("[View Safely]"));
        assert!(app.hits.iter().any(|h| h.target == HitTarget::CloseIsolated));
    }

    #[test]
    fn preview_safely_shows_file_name_not_type_or_size() {
        let mut app = test_app();
        app.select_message_at(1);
        app.focus = Focus::Detail;
        app.trigger_action(1);
        let text = draw(&mut app).join("\n");
        assert!(text.contains("File Preview"));
        assert!(text.contains("timeline-v2.xlsx"));
        assert!(!text.contains("spreadsheet"));
        assert!(!text.contains("856 KB"));
    }

    #[test]
    fn nothing_selected_means_no_detail_panel() {
        let mut app = test_app();
        let text = draw(&mut app).join("\n");
        assert!(!text.contains("Isolated Content Viewer"));
        assert!(!text.contains("[View Safely]"));
    }
}
