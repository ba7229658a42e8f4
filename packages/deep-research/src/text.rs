//! Prompt budget helpers.

/// Characters of page content sent per search result.
pub const RESULT_CONTENT_BUDGET: usize = 25_000;

/// Smallest budget worth trimming to; anything shorter is returned as-is.
const MIN_BUDGET: usize = 140;

/// Trim `text` to at most `max_chars` characters.
///
/// Prefers to cut on a paragraph, line or word boundary when one exists in
/// the last fifth of the budget.
pub fn trim_to_budget(text: &str, max_chars: usize) -> &str {
    let max_chars = max_chars.max(MIN_BUDGET);
    let cut = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text,
    };

    let head = &text[..cut];
    let floor = cut * 4 / 5;
    for separator in ["\n\n", "\n", " "] {
        if let Some(idx) = head.rfind(separator) {
            if idx >= floor {
                return head[..idx].trim_end();
            }
        }
    }
    head
}
