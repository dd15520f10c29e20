//! Formatting utilities used for CLI outputs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ANSI pattern is valid"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Terminal columns taken by `s`, escape sequences excluded.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Pad to `width` visible columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Cut to at most `max` visible columns, ending with `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    let plain = strip_ansi(s);
    if UnicodeWidthStr::width(plain.as_str()) <= max {
        return plain;
    }
    let mut out = String::new();
    let mut used = 0;
    for c in plain.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 3 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Human label of a span of days.
pub fn days_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}
