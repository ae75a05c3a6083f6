use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{200B}-\u{200D}\u{2060}\u{FEFF}\u{00AD}]").unwrap());

/// NFC-normalizes one extracted line, strips zero-width characters and byte
/// order marks, and collapses runs of whitespace into single spaces.
///
/// Compatibility folding (NFKC) is not applied: it decomposes Thai SARA AM.
pub fn normalize_line(raw: &str) -> String {
    let normalized: String = raw.nfc().collect();
    let visible = INVISIBLE.replace_all(&normalized, "");

    let mut result = String::with_capacity(visible.len());
    collapse_internal_whitespace(visible.trim(), &mut result);
    result
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
