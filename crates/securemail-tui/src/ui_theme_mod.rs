use ratatui::style::{Color, Modifier, Style};

use super::{UiPalette, UiTheme, log_debug, style_with_colors};

impl UiTheme {
    pub(crate) fn from_name(name: &str) -> Self {
        match name {
            "securemail" => Self::securemail(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "dracula" => Self::dracula(),
            "solarized-light" => Self::solarized_light(),
            _ => Self::default_theme(),
        }
    }

    pub(crate) fn from_palette(palette: Option<&UiPalette>) -> Self {
        let Some(palette) = palette else {
            log_debug("config warn ui.theme=custom but ui.palette missing; using default");
            return Self::default_theme();
        };
        let base_fg = palette.base_fg;
        let base_bg = palette.base_bg;
        let border = palette.border;
        let bar_fg = palette.bar_fg.or(base_fg);
        let bar_bg = palette.bar_bg.or(base_bg);
        let accent = palette.accent.or(palette.link).or(base_fg);
        let warn = palette.warn.or(accent);
        let success = palette.success.or(accent);
        let selection_bg = palette.selection_bg.or(bar_bg).or(base_bg);
        let selection_fg = palette.selection_fg.or(accent).or(base_fg);
        let link = palette.link.or(accent);
        let muted = palette.muted.or(border).or(base_fg);

        Self {
            base: style_with_colors(base_fg, base_bg),
            border: style_with_colors(border, None),
            border_focus: style_with_colors(accent, None),
            bar: style_with_colors(bar_fg, bar_bg),
            title: style_with_colors(accent, None).add_modifier(Modifier::BOLD),
            focus_bg: style_with_colors(None, selection_bg),
            focus_fg: style_with_colors(selection_fg, None),
            card_unread: style_with_colors(base_fg, None).add_modifier(Modifier::BOLD),
            card_unread_bg: style_with_colors(None, bar_bg),
            badge: style_with_colors(base_bg, accent).add_modifier(Modifier::BOLD),
            star: style_with_colors(warn, None),
            muted: style_with_colors(muted, None),
            link: style_with_colors(link, None).add_modifier(Modifier::UNDERLINED),
            action: style_with_colors(accent, None),
            action_selected: style_with_colors(base_bg, accent).add_modifier(Modifier::BOLD),
            disabled: style_with_colors(muted, None).add_modifier(Modifier::DIM),
            secure: style_with_colors(success, None),
            warn: style_with_colors(warn, None),
            input: style_with_colors(base_fg, None),
            code: style_with_colors(base_fg, selection_bg),
        }
    }

    pub(crate) fn default_theme() -> Self {
        Self {
            base: Style::default(),
            border: Style::default().fg(Color::DarkGray),
            border_focus: Style::default().fg(Color::LightBlue),
            bar: Style::default(),
            title: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(Color::DarkGray),
            focus_fg: Style::default().fg(Color::Yellow),
            card_unread: Style::default().add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(Color::Indexed(17)),
            badge: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(Color::Yellow),
            muted: Style::default().fg(Color::Gray),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(Color::LightBlue),
            action_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            secure: Style::default().fg(Color::Green),
            warn: Style::default().fg(Color::Yellow),
            input: Style::default(),
            code: Style::default().fg(Color::Gray).bg(Color::Black),
        }
    }

    /// Blue-on-slate look of the web mail client.
    pub(crate) fn securemail() -> Self {
        let blue = Color::Rgb(37, 99, 235); // #2563eb
        let blue_light = Color::Rgb(96, 165, 250); // #60a5fa
        let slate_900 = Color::Rgb(15, 23, 42); // #0f172a
        let slate_800 = Color::Rgb(30, 41, 59); // #1e293b
        let slate_700 = Color::Rgb(51, 65, 85); // #334155
        let slate_400 = Color::Rgb(148, 163, 184); // #94a3b8
        let slate_100 = Color::Rgb(241, 245, 249); // #f1f5f9
        let green = Color::Rgb(34, 197, 94); // #22c55e
        let amber = Color::Rgb(245, 158, 11); // #f59e0b
        let unread_bg = Color::Rgb(23, 37, 84); // #172554
        Self {
            base: Style::default().fg(slate_100).bg(slate_900),
            border: Style::default().fg(slate_700),
            border_focus: Style::default().fg(blue_light),
            bar: Style::default().fg(slate_100).bg(slate_800),
            title: Style::default().fg(blue_light).add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(slate_700),
            focus_fg: Style::default().fg(blue_light),
            card_unread: Style::default().fg(slate_100).add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(unread_bg),
            badge: Style::default()
                .fg(slate_100)
                .bg(blue)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(amber),
            muted: Style::default().fg(slate_400),
            link: Style::default()
                .fg(blue_light)
                .add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(blue_light),
            action_selected: Style::default()
                .fg(slate_100)
                .bg(blue)
                .add_modifier(Modifier::BOLD),
            disabled: Style::default().fg(slate_700),
            secure: Style::default().fg(green),
            warn: Style::default().fg(amber),
            input: Style::default().fg(slate_100).bg(slate_800),
            code: Style::default().fg(slate_100).bg(slate_800),
        }
    }

    pub(crate) fn nord() -> Self {
        let polar0 = Color::Rgb(46, 52, 64); // #2e3440
        let polar1 = Color::Rgb(59, 66, 82); // #3b4252
        let polar2 = Color::Rgb(67, 76, 94); // #434c5e
        let polar3 = Color::Rgb(76, 86, 106); // #4c566a
        let snow = Color::Rgb(216, 222, 233); // #d8dee9
        let frost = Color::Rgb(136, 192, 208); // #88c0d0
        let frost_blue = Color::Rgb(129, 161, 193); // #81a1c1
        let green = Color::Rgb(163, 190, 140); // #a3be8c
        let yellow = Color::Rgb(235, 203, 139); // #ebcb8b
        Self {
            base: Style::default().fg(snow).bg(polar0),
            border: Style::default().fg(polar3),
            border_focus: Style::default().fg(frost),
            bar: Style::default().fg(snow).bg(polar1),
            title: Style::default().fg(frost).add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(polar2),
            focus_fg: Style::default().fg(frost),
            card_unread: Style::default().fg(snow).add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(polar1),
            badge: Style::default()
                .fg(polar0)
                .bg(frost_blue)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(yellow),
            muted: Style::default().fg(polar3),
            link: Style::default()
                .fg(frost)
                .add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(frost_blue),
            action_selected: Style::default().fg(polar0).bg(frost),
            disabled: Style::default().fg(polar3),
            secure: Style::default().fg(green),
            warn: Style::default().fg(yellow),
            input: Style::default().fg(snow).bg(polar1),
            code: Style::default().fg(snow).bg(polar1),
        }
    }

    pub(crate) fn gruvbox() -> Self {
        let bg0 = Color::Rgb(40, 40, 40); // #282828
        let bg1 = Color::Rgb(60, 56, 54); // #3c3836
        let bg2 = Color::Rgb(80, 73, 69); // #504945
        let fg = Color::Rgb(235, 219, 178); // #ebdbb2
        let gray = Color::Rgb(146, 131, 116); // #928374
        let yellow = Color::Rgb(250, 189, 47); // #fabd2f
        let aqua = Color::Rgb(142, 192, 124); // #8ec07c
        let blue = Color::Rgb(131, 165, 152); // #83a598
        let orange = Color::Rgb(254, 128, 25); // #fe8019
        Self {
            base: Style::default().fg(fg).bg(bg0),
            border: Style::default().fg(bg2),
            border_focus: Style::default().fg(yellow),
            bar: Style::default().fg(fg).bg(bg1),
            title: Style::default().fg(yellow).add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(bg2),
            focus_fg: Style::default().fg(yellow),
            card_unread: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(bg1),
            badge: Style::default()
                .fg(bg0)
                .bg(blue)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(yellow),
            muted: Style::default().fg(gray),
            link: Style::default().fg(blue).add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(blue),
            action_selected: Style::default().fg(bg0).bg(yellow),
            disabled: Style::default().fg(bg2),
            secure: Style::default().fg(aqua),
            warn: Style::default().fg(orange),
            input: Style::default().fg(fg).bg(bg1),
            code: Style::default().fg(fg).bg(bg1),
        }
    }

    pub(crate) fn dracula() -> Self {
        let bg = Color::Rgb(40, 42, 54); // #282a36
        let current = Color::Rgb(68, 71, 90); // #44475a
        let fg = Color::Rgb(248, 248, 242); // #f8f8f2
        let comment = Color::Rgb(98, 114, 164); // #6272a4
        let cyan = Color::Rgb(139, 233, 253); // #8be9fd
        let green = Color::Rgb(80, 250, 123); // #50fa7b
        let purple = Color::Rgb(189, 147, 249); // #bd93f9
        let yellow = Color::Rgb(241, 250, 140); // #f1fa8c
        let orange = Color::Rgb(255, 184, 108); // #ffb86c
        Self {
            base: Style::default().fg(fg).bg(bg),
            border: Style::default().fg(comment),
            border_focus: Style::default().fg(purple),
            bar: Style::default().fg(fg).bg(current),
            title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(current),
            focus_fg: Style::default().fg(cyan),
            card_unread: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(current),
            badge: Style::default()
                .fg(bg)
                .bg(purple)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(yellow),
            muted: Style::default().fg(comment),
            link: Style::default().fg(cyan).add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(cyan),
            action_selected: Style::default().fg(bg).bg(cyan),
            disabled: Style::default().fg(comment),
            secure: Style::default().fg(green),
            warn: Style::default().fg(orange),
            input: Style::default().fg(fg).bg(current),
            code: Style::default().fg(fg).bg(current),
        }
    }

    pub(crate) fn solarized_light() -> Self {
        let base3 = Color::Rgb(253, 246, 227); // #fdf6e3
        let base2 = Color::Rgb(238, 232, 213); // #eee8d5
        let base1 = Color::Rgb(147, 161, 161); // #93a1a1
        let base00 = Color::Rgb(101, 123, 131); // #657b83
        let base01 = Color::Rgb(88, 110, 117); // #586e75
        let blue = Color::Rgb(38, 139, 210); // #268bd2
        let green = Color::Rgb(133, 153, 0); // #859900
        let yellow = Color::Rgb(181, 137, 0); // #b58900
        let orange = Color::Rgb(203, 75, 22); // #cb4b16
        Self {
            base: Style::default().fg(base00).bg(base3),
            border: Style::default().fg(base1),
            border_focus: Style::default().fg(blue),
            bar: Style::default().fg(base01).bg(base2),
            title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            focus_bg: Style::default().bg(base2),
            focus_fg: Style::default().fg(blue),
            card_unread: Style::default().fg(base01).add_modifier(Modifier::BOLD),
            card_unread_bg: Style::default().bg(base2),
            badge: Style::default()
                .fg(base3)
                .bg(blue)
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(yellow),
            muted: Style::default().fg(base1),
            link: Style::default().fg(blue).add_modifier(Modifier::UNDERLINED),
            action: Style::default().fg(blue),
            action_selected: Style::default().fg(base3).bg(blue),
            disabled: Style::default().fg(base1),
            secure: Style::default().fg(green),
            warn: Style::default().fg(orange),
            input: Style::default().fg(base01).bg(base2),
            code: Style::default().fg(base01).bg(base2),
        }
    }
}
