use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use securemail_core::{Folder, IsolatedScope, Mailbox, SeedSource, ViewerState, log_debug};
use shell_words::split as shell_split;
use unicode_width::UnicodeWidthStr;

mod app_lifecycle_mod;
mod cli;
mod detail_mod;
mod input_main_mod;
mod input_mouse_mod;
mod list_state_mod;
mod ui_theme_mod;
mod util_mod;

use crate::cli::{
    Cli, load_ui_config, load_viewer_config, output_error, resolve_cli_command, run_cli,
};
use crate::detail_mod::render_detail;
use crate::util_mod::{
    apply_input_key, char_to_byte_idx, move_cursor_left, move_cursor_right, text_char_len,
    truncate_label, wrap_text,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const CLI_SCHEMA_VERSION: &str = "securemail.cli.v1";
const APP_TITLE: &str = "SecureMail";
const SEARCH_PLACEHOLDER: &str = "Search emails...";
const SECURE_LABEL: &str = "Secure Connection";
const FOOTER_TEXT: &str = "Always verify sender addresses and never share sensitive information";
const CARD_HEIGHT: u16 = 5;
const DEFAULT_SIDEBAR_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Main,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Folders,
    Messages,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    Folder(Folder),
    Message(usize),
    Action(usize),
    CloseIsolated,
    Search,
}

#[derive(Debug, Clone, Copy)]
struct HitRegion {
    area: Rect,
    target: HitTarget,
}

struct App {
    mode: Mode,
    focus: Focus,
    mailbox: Mailbox,
    state: ViewerState,
    message_index: usize,
    list_scroll: usize,
    action_index: usize,
    detail_scroll: u16,
    search_query: String,
    search_cursor: usize,
    show_help: bool,
    sidebar_width: u16,
    ui_theme_name: String,
    ui_theme: UiTheme,
    /// Rebuilt on every draw; routes the next mouse click.
    hits: Vec<HitRegion>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let theme_override = cli.theme.clone();
    let (cli_requested, cli_command) = match resolve_cli_command(cli) {
        Ok(result) => result,
        Err(err) => {
            return output_error(&err.to_string());
        }
    };
    let mailbox = Mailbox::from_source(&SeedSource)?;
    if cli_requested {
        let Some(command) = cli_command else {
            return output_error("No command provided");
        };
        if let Err(err) = run_cli(command, &mailbox) {
            return output_error(&err.to_string());
        }
        return Ok(());
    }

    let ui_config = load_ui_config();
    let viewer_config = load_viewer_config();
    let theme_name = theme_override
        .or_else(|| std::env::var("SECUREMAIL_THEME").ok())
        .map(|raw| normalize_ui_theme(&raw))
        .unwrap_or_else(|| ui_config.theme.clone());
    let ui_theme = if theme_name == "custom" {
        UiTheme::from_palette(ui_config.palette.as_ref())
    } else {
        UiTheme::from_name(&theme_name)
    };
    log_debug(&format!(
        "startup messages={} theme={} isolated_scope={:?}",
        mailbox.len(),
        theme_name,
        viewer_config.isolated_scope
    ));

    let mut app = App::new(
        mailbox,
        viewer_config.isolated_scope,
        ui_config.sidebar_width_cols,
        theme_name,
        ui_theme,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
}

fn ui(frame: &mut ratatui::Frame, app: &mut App) {
    app.hits.clear();
    let area = frame.area();
    frame.render_widget(Block::default().style(app.ui_theme.base), area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(app.sidebar_width), Constraint::Min(1)])
        .split(area);
    render_sidebar(frame, columns[0], app);

    let help_height = if app.show_help { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(help_height),
        ])
        .split(columns[1]);
    render_header(frame, rows[0], app);
    render_content(frame, rows[1], app);
    render_footer(frame, rows[2], app);
    render_help_bar(frame, rows[3], app);
}

fn render_sidebar(frame: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .style(app.ui_theme.base)
        .border_style(if app.focus == Focus::Folders && app.mode == Mode::Main {
            app.ui_theme.border_focus
        } else {
            app.ui_theme.border
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let title = Line::from(vec![
        Span::styled(" ✉ ", app.ui_theme.title),
        Span::styled(APP_TITLE, app.ui_theme.title),
    ]);
    frame.render_widget(Paragraph::new(title), rows[0]);

    // No handler: compose is out of scope.
    let compose = Paragraph::new("Compose")
        .alignment(Alignment::Center)
        .style(app.ui_theme.disabled)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.ui_theme.disabled),
        );
    frame.render_widget(compose, rows[1]);

    let list_area = rows[3];
    for (idx, folder) in Folder::ALL.into_iter().enumerate() {
        let y = list_area.y + idx as u16;
        if y >= list_area.y + list_area.height {
            break;
        }
        let row = Rect {
            x: list_area.x,
            y,
            width: list_area.width,
            height: 1,
        };
        let selected = app.state.folder == folder;
        let style = if selected {
            if app.focus == Focus::Folders {
                app.ui_theme.focus_bg
            } else {
                app.ui_theme.focus_fg
            }
        } else {
            Style::default()
        };
        let marker = if selected { "▌" } else { " " };
        let label = format!("{} {}  {}", marker, idx + 1, folder.label());
        let padded = format!("{:<width$}", label, width = row.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, style)), row);
        app.hits.push(HitRegion {
            area: row,
            target: HitTarget::Folder(folder),
        });
    }
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(SECURE_LABEL.width() as u16 + 6),
        ])
        .split(area);

    let searching = app.mode == Mode::Search;
    let search_block = Block::default()
        .borders(Borders::ALL)
        .title(" / ")
        .style(app.ui_theme.input)
        .border_style(if searching {
            app.ui_theme.border_focus
        } else {
            app.ui_theme.border
        });
    let search_inner = search_block.inner(columns[0]);
    let text = if app.search_query.is_empty() && !searching {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, app.ui_theme.muted))
    } else {
        Line::from(app.search_query.as_str())
    };
    frame.render_widget(Paragraph::new(text).block(search_block), columns[0]);
    if searching && search_inner.width > 0 {
        let before = &app.search_query[..char_to_byte_idx(&app.search_query, app.search_cursor)];
        let col = (before.width() as u16).min(search_inner.width.saturating_sub(1));
        frame.set_cursor_position((search_inner.x + col, search_inner.y));
    }
    app.hits.push(HitRegion {
        area: columns[0],
        target: HitTarget::Search,
    });

    let secure_row = Rect {
        x: columns[1].x,
        y: columns[1].y + columns[1].height / 2,
        width: columns[1].width,
        height: 1.min(columns[1].height),
    };
    let secure = Line::from(vec![
        Span::styled("◆ ", app.ui_theme.secure),
        Span::styled(SECURE_LABEL, app.ui_theme.muted),
    ]);
    frame.render_widget(
        Paragraph::new(secure).alignment(Alignment::Center),
        secure_row,
    );
}

fn render_content(frame: &mut ratatui::Frame, area: Rect, app: &mut App) {
    if app.selected_message().is_some() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
            .split(area);
        render_message_list(frame, columns[0], app, true);
        render_detail(frame, columns[1], app);
    } else {
        render_message_list(frame, area, app, false);
    }
}

fn render_message_list(frame: &mut ratatui::Frame, area: Rect, app: &mut App, split: bool) {
    let focused = app.focus == Focus::Messages && app.mode == Mode::Main;
    let block = Block::default()
        .borders(if split { Borders::RIGHT } else { Borders::NONE })
        .style(app.ui_theme.base)
        .border_style(app.ui_theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = app.mailbox.messages_in(app.state.folder).len();
    if total == 0 {
        frame.render_widget(
            Paragraph::new("No messages").style(app.ui_theme.muted),
            inner,
        );
        return;
    }
    let cards_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    if app.message_index < app.list_scroll {
        app.list_scroll = app.message_index;
    } else if app.message_index >= app.list_scroll + cards_visible {
        app.list_scroll = app.message_index + 1 - cards_visible;
    }
    let start = app.list_scroll.min(total.saturating_sub(1));
    let end = (start + cards_visible).min(total);

    let theme = &app.ui_theme;
    let messages = app.mailbox.messages_in(app.state.folder);
    for (slot, idx) in (start..end).enumerate() {
        let message = &messages[idx];
        let y = inner.y + slot as u16 * CARD_HEIGHT;
        let card = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT.min(inner.y + inner.height - y),
        };
        let is_cursor = idx == app.message_index;
        let is_selected = app.state.selected.as_deref() == Some(message.id.as_str());

        let mut card_style = if message.read {
            theme.base
        } else {
            theme.card_unread_bg
        };
        if is_selected {
            card_style = card_style.patch(theme.focus_bg);
        }
        let border_style = if is_cursor && focused {
            theme.border_focus
        } else if !message.read {
            theme.card_unread
        } else {
            theme.border
        };

        let mut first = Vec::new();
        let mut extras_width = 0;
        if !message.read {
            extras_width += 6;
        }
        if message.starred {
            extras_width += 2;
        }
        let inner_width = card.width.saturating_sub(2) as usize;
        first.push(Span::styled(
            truncate_label(&message.from, inner_width.saturating_sub(extras_width)),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        if !message.read {
            first.push(Span::raw(" "));
            first.push(Span::styled(" New ", theme.badge));
        }
        if message.starred {
            first.push(Span::raw(" "));
            first.push(Span::styled("★", theme.star));
        }
        let lines = vec![
            Line::from(first),
            Line::from(truncate_label(&message.subject, inner_width)),
            Line::from(Span::styled(
                truncate_label(&message.preview, inner_width),
                theme.muted,
            )),
        ];
        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(card_style)
            .title_top(
                Line::from(Span::styled(format!(" {} ", message.date), theme.muted))
                    .right_aligned(),
            );
        frame.render_widget(Paragraph::new(lines).block(card_block), card);
        app.hits.push(HitRegion {
            area: card,
            target: HitTarget::Message(idx),
        });
    }
}

fn render_footer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("⚠ ", app.ui_theme.warn),
        Span::raw(FOOTER_TEXT),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(app.ui_theme.bar),
        area,
    );
}

fn render_help_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let help = match app.mode {
        Mode::Search => String::from("type to search  ←/→ move  Esc/Enter done"),
        Mode::Main if app.show_help => format!(
            "Tab/h/l focus  j/k move  Enter open/activate  Esc/x close isolated view  1-4 folder\n\
/ search  ? help  q quit  mouse: click folders, messages, View/Preview Safely, Close  theme: {}",
            app.theme_name()
        ),
        Mode::Main => String::from(
            "Tab focus  j/k move  Enter activate  Esc close  1-4 folder  / search  ? help  q quit",
        ),
    };
    frame.render_widget(Paragraph::new(help).style(app.ui_theme.bar), area);
}

fn xdg_config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

fn config_path_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("securemail.toml"),
        xdg_config_dir().join("securemail").join("securemail.toml"),
    ]
}

fn load_config_text() -> Option<String> {
    for path in config_path_candidates() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log_debug(&format!("config loaded from {}", path.display()));
            return Some(content);
        }
    }
    None
}

#[derive(Debug, Clone)]
struct UiConfig {
    sidebar_width_cols: u16,
    theme: String,
    palette: Option<UiPalette>,
}

#[derive(Debug, Clone)]
struct ViewerConfig {
    isolated_scope: IsolatedScope,
}

#[derive(Debug, Clone)]
struct UiPalette {
    base_fg: Option<Color>,
    base_bg: Option<Color>,
    border: Option<Color>,
    bar_fg: Option<Color>,
    bar_bg: Option<Color>,
    accent: Option<Color>,
    warn: Option<Color>,
    success: Option<Color>,
    selection_bg: Option<Color>,
    selection_fg: Option<Color>,
    link: Option<Color>,
    muted: Option<Color>,
}

#[derive(Debug, Clone)]
struct UiTheme {
    base: Style,
    border: Style,
    border_focus: Style,
    bar: Style,
    title: Style,
    focus_bg: Style,
    focus_fg: Style,
    card_unread: Style,
    card_unread_bg: Style,
    badge: Style,
    star: Style,
    muted: Style,
    link: Style,
    action: Style,
    action_selected: Style,
    disabled: Style,
    secure: Style,
    warn: Style,
    input: Style,
    code: Style,
}

fn style_with_colors(fg: Option<Color>, bg: Option<Color>) -> Style {
    let mut style = Style::default();
    if let Some(fg) = fg {
        style = style.fg(fg);
    }
    if let Some(bg) = bg {
        style = style.bg(bg);
    }
    style
}

fn normalize_ui_theme(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    let normalized = if lowered.is_empty() {
        "default"
    } else {
        lowered.as_str()
    };
    match normalized {
        "default" | "securemail" | "nord" | "gruvbox" | "dracula" | "solarized-light"
        | "custom" => normalized.to_string(),
        _ => {
            log_debug(&format!(
                "config warn unknown ui theme='{}', using default",
                raw
            ));
            "default".to_string()
        }
    }
}

fn parse_ui_palette(value: &toml::Value) -> Option<UiPalette> {
    let table = value.as_table()?;
    Some(UiPalette {
        base_fg: table.get("base_fg").and_then(parse_toml_color),
        base_bg: table.get("base_bg").and_then(parse_toml_color),
        border: table.get("border").and_then(parse_toml_color),
        bar_fg: table.get("bar_fg").and_then(parse_toml_color),
        bar_bg: table.get("bar_bg").and_then(parse_toml_color),
        accent: table.get("accent").and_then(parse_toml_color),
        warn: table.get("warn").and_then(parse_toml_color),
        success: table.get("success").and_then(parse_toml_color),
        selection_bg: table.get("selection_bg").and_then(parse_toml_color),
        selection_fg: table.get("selection_fg").and_then(parse_toml_color),
        link: table.get("link").and_then(parse_toml_color),
        muted: table.get("muted").and_then(parse_toml_color),
    })
}

fn parse_toml_color(value: &toml::Value) -> Option<Color> {
    value.as_str().and_then(parse_hex_color)
}

fn parse_hex_color(raw: &str) -> Option<Color> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
