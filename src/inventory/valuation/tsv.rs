//! Tab-separated text splitting.

/// Field delimiter used by inventory feeds.
pub const FIELD_DELIMITER: char = '\t';
/// Line delimiter used by inventory feeds.
pub const LINE_DELIMITER: char = '\n';

/// Trims the whole feed and splits it into lines. Whitespace-only input
/// yields no lines.
pub fn split_lines(contents: &str) -> Vec<&str> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(LINE_DELIMITER).collect()
}

/// Splits one line on tabs. Empty fields are preserved.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).collect()
}
