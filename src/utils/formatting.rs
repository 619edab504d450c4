/// Row terminator for the report
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Number of spaces needed to fill `width` after `value`. Never negative.
pub fn padding_len(value: &str, width: usize) -> usize {
    width.saturating_sub(value.chars().count())
}

/// Format one report cell: the value, a comma, then padding up to `width`.
/// Values wider than the column are written whole.
pub fn format_column(value: &str, width: usize) -> String {
    format!("{},{}", value, " ".repeat(padding_len(value, width)))
}
