//! Titles of generated metrics.

/// Longest title the server accepts, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Appended to the title of period-over-period metrics.
pub const POP_TITLE_SUFFIX: &str = " - previous year";

/// Append `suffix` to `title`, shortening the title with `…` when the result
/// would exceed [`MAX_TITLE_LENGTH`]. A closing parenthesis at the end of the
/// title survives the cut.
pub fn truncate_title(title: &str, suffix: &str) -> String {
    let max_length = MAX_TITLE_LENGTH.saturating_sub(suffix.chars().count());

    if title.chars().count() <= max_length {
        return format!("{title}{suffix}");
    }

    let (keep, marker) = if title.ends_with(')') {
        (max_length.saturating_sub(2), "…)")
    } else {
        (max_length.saturating_sub(1), "…")
    };
    let head: String = title.chars().take(keep).collect();

    format!("{head}{marker}{suffix}")
}

/// Title of a base (non period-over-period) generated metric.
pub fn base_metric_title(title: &str) -> String {
    truncate_title(title, "")
}

/// Title of a period-over-period metric.
pub fn pop_metric_title(title: &str) -> String {
    truncate_title(title, POP_TITLE_SUFFIX)
}
