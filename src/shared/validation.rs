use crate::options::Delimiter;
use crate::shared::constants::LIST_ITEM_MARKER;
use crate::shared::literal_utils::is_boolean_or_null_literal;

// Structural tokens force quoting independent of the active delimiter.
const STRUCTURAL: &[char] = &[':', ',', '\t', '|', '{', '}', '[', ']', '"', '\n', '\r'];

// `[A-Za-z_][A-Za-z0-9_.]*`
#[must_use]
pub fn is_unquoted_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }

    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.')
}

// `[A-Za-z_][A-Za-z0-9_]*` — no dots; the unit of key folding and path
// expansion.
#[must_use]
pub fn is_identifier_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }

    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[must_use]
pub fn needs_quoting(value: &str, delimiter: Delimiter) -> bool {
    if value.is_empty() {
        return true;
    }

    // Leading or trailing whitespace would be lost to token trimming.
    if value.trim() != value {
        return true;
    }

    if is_boolean_or_null_literal(value) {
        return true;
    }

    // Anything the float parser fully consumes would decode as a number.
    if value.parse::<f64>().is_ok() {
        return true;
    }

    if value.contains(STRUCTURAL) {
        return true;
    }

    if value
        .chars()
        .any(|ch| matches!(ch, '\u{0000}'..='\u{001F}' | '\u{007F}'))
    {
        return true;
    }

    if value.contains(delimiter.as_char()) {
        return true;
    }

    if value.starts_with(LIST_ITEM_MARKER) {
        return true;
    }

    false
}
