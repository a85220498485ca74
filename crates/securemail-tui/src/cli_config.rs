use securemail_core::{IsolatedScope, log_debug};

use super::{
    DEFAULT_SIDEBAR_WIDTH, UiConfig, ViewerConfig, load_config_text, normalize_ui_theme,
    parse_ui_palette,
};

const SIDEBAR_WIDTH_RANGE: (i64, i64) = (16, 40);

pub(crate) fn load_ui_config() -> UiConfig {
    ui_config_from_text(load_config_text().as_deref())
}

pub(crate) fn load_viewer_config() -> ViewerConfig {
    viewer_config_from_text(load_config_text().as_deref())
}

fn parse_config(content: Option<&str>) -> Option<toml::Value> {
    let content = content?;
    match toml::from_str(content) {
        Ok(value) => Some(value),
        Err(err) => {
            log_debug(&format!("config parse error: {}", err));
            None
        }
    }
}

pub(crate) fn ui_config_from_text(content: Option<&str>) -> UiConfig {
    let default = UiConfig {
        sidebar_width_cols: DEFAULT_SIDEBAR_WIDTH,
        theme: "default".to_string(),
        palette: None,
    };
    let Some(value) = parse_config(content) else {
        return default;
    };
    let Some(ui) = value.get("ui") else {
        return default;
    };
    let sidebar_width_cols = match ui.get("sidebar_width_cols") {
        Some(v) => v.as_integer().unwrap_or(DEFAULT_SIDEBAR_WIDTH as i64),
        None => DEFAULT_SIDEBAR_WIDTH as i64,
    };
    let theme = ui
        .get("theme")
        .and_then(|v| v.as_str())
        .map(normalize_ui_theme)
        .unwrap_or_else(|| "default".to_string());
    let palette = ui.get("palette").and_then(parse_ui_palette);
    UiConfig {
        sidebar_width_cols: sidebar_width_cols.clamp(SIDEBAR_WIDTH_RANGE.0, SIDEBAR_WIDTH_RANGE.1)
            as u16,
        theme,
        palette,
    }
}

pub(crate) fn viewer_config_from_text(content: Option<&str>) -> ViewerConfig {
    let isolated_scope = parse_config(content)
        .as_ref()
        .and_then(|value| value.get("viewer"))
        .and_then(|viewer| viewer.get("isolated_scope"))
        .and_then(|v| v.as_str())
        .map(|raw| {
            IsolatedScope::parse(raw).unwrap_or_else(|| {
                log_debug(&format!(
                    "config warn unknown viewer.isolated_scope='{}', using global",
                    raw
                ));
                IsolatedScope::Global
            })
        })
        .unwrap_or_default();
    ViewerConfig { isolated_scope }
}
