/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so Arabic prompts are never split
/// inside a code point.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// True when the input carries nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
