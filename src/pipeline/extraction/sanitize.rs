use super::types::PageText;

/// Normalize one line of report text: every run of whitespace (newlines
/// included) becomes a single space, and the ends are trimmed.
pub fn clean_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split every page into lines and concatenate them in document order.
/// Page boundaries are not kept. Lines are cleaned; empty ones stay in the
/// sequence and simply match no anchor.
pub fn document_lines(pages: &[PageText]) -> Vec<String> {
    pages
        .iter()
        .filter(|p| !p.text.is_empty())
        .flat_map(|p| p.text.split('\n'))
        .map(clean_line)
        .collect()
}
