//! Strip blank lines and pagination artifacts from extracted text.

/// Lines starting with this token are page footers/headers from PDF-to-text.
pub const PAGE_MARKER: &str = "Página";

/// pdftotext separates pages with a form feed.
const FORM_FEED: char = '\u{c}';

/// Raw lines, breaking on `\n`, `\r\n` and form feeds.
pub fn raw_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split(FORM_FEED))
}

/// Trimmed, non-empty, non-pagination lines in document order.
pub fn normalize(text: &str) -> Vec<&str> {
    normalize_lines(raw_lines(text))
}

pub fn normalize_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    lines
        .into_iter()
        .filter(|line| !line.starts_with(PAGE_MARKER))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
