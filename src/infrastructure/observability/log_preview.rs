const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens user-supplied text for logging without splitting a character.
pub fn preview_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    if total <= MAX_VISIBLE_CHARS {
        return trimmed.to_string();
    }

    let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
    format!("{visible}... ({total} chars total)")
}
