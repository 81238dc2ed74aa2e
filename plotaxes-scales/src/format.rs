const ELLIPSIS: char = '…';

/// Shortens a tick or annotation label to at most `max_chars` characters,
/// replacing the tail with an ellipsis. Counts characters, not bytes.
pub fn truncate_with_ellipsis(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated: String = label.chars().take(max_chars - 1).collect();
    truncated.push(ELLIPSIS);
    truncated
}
