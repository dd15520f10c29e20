/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Verified ranges are green, ranges still awaiting review are yellow.
pub fn color_for_verified(verified: bool) -> &'static str {
    if verified { GREEN } else { YELLOW }
}

pub fn verified_label(verified: bool) -> String {
    let label = if verified { "verified" } else { "pending" };
    format!("{}{}{}", color_for_verified(verified), label, RESET)
}

/// Grey out placeholders such as `--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
