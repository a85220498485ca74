use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) fn text_char_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn clamp_cursor(cursor: usize, text: &str) -> usize {
    cursor.min(text_char_len(text))
}

pub(crate) fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    let mut count = 0usize;
    for (byte_idx, _) in text.char_indices() {
        if count == char_idx {
            return byte_idx;
        }
        count += 1;
    }
    text.len()
}

fn remove_char_at(text: &mut String, char_idx: usize) {
    let start = char_to_byte_idx(text, char_idx);
    let end = char_to_byte_idx(text, char_idx + 1);
    if start < end {
        text.replace_range(start..end, "");
    }
}

pub(crate) fn move_cursor_left(text: &str, cursor: &mut usize) {
    *cursor = clamp_cursor(*cursor, text);
    if *cursor > 0 {
        *cursor -= 1;
    }
}

pub(crate) fn move_cursor_right(text: &str, cursor: &mut usize) {
    let len = text_char_len(text);
    *cursor = (*cursor).min(len);
    if *cursor < len {
        *cursor += 1;
    }
}

pub(crate) fn apply_input_key(target: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Backspace => {
            if *cursor > 0 {
                remove_char_at(target, *cursor - 1);
                *cursor -= 1;
                return true;
            }
        }
        KeyCode::Delete => {
            let len = text_char_len(target);
            if *cursor < len {
                remove_char_at(target, *cursor);
                return true;
            }
        }
        KeyCode::Char(c) => {
            let idx = char_to_byte_idx(target, *cursor);
            target.insert_str(idx, c.encode_utf8(&mut [0; 4]));
            *cursor += 1;
            return true;
        }
        _ => {}
    }
    *cursor = clamp_cursor(*cursor, target);
    false
}

/// Cuts `label` to at most `max_width` display columns, ending in "..." when cut.
pub(crate) fn truncate_label(label: &str, max_width: usize) -> String {
    let text = label.replace(['\n', '\r'], " ");
    if text.width() <= max_width {
        return text;
    }
    let keep = if max_width <= 3 { max_width } else { max_width - 3 };
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > keep {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

/// Greedy word wrap by display width. Words longer than `width` are split.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut line = String::new();
        let mut line_width = 0usize;
        for word in raw_line.split_whitespace() {
            let word_width = word.width();
            let sep = usize::from(!line.is_empty());
            if line_width + sep + word_width <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += sep + word_width;
                continue;
            }
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if line_width + w > width && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += w;
            }
        }
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
