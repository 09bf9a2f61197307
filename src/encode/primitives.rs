use std::fmt::Write;

use crate::Value;
use crate::options::Delimiter;
use crate::shared::constants::{DOUBLE_QUOTE, FALSE_LITERAL, NULL_LITERAL, TRUE_LITERAL};
use crate::shared::string_utils::escape_string;
use crate::shared::validation::{is_unquoted_key, needs_quoting};

#[must_use]
pub fn render_scalar(value: &Value, delimiter: Delimiter) -> String {
    match value {
        Value::Null => NULL_LITERAL.to_string(),
        Value::Bool(true) => TRUE_LITERAL.to_string(),
        Value::Bool(false) => FALSE_LITERAL.to_string(),
        Value::Int(number) => number.to_string(),
        Value::Float(number) => number.to_string(),
        Value::Str(text) => render_string(text, delimiter),
        Value::List(_) | Value::Obj(_) => unreachable!("render_scalar called on a container"),
    }
}

#[must_use]
pub fn render_string(value: &str, delimiter: Delimiter) -> String {
    if needs_quoting(value, delimiter) {
        format!("{DOUBLE_QUOTE}{}{DOUBLE_QUOTE}", escape_string(value))
    } else {
        value.to_string()
    }
}

#[must_use]
pub fn render_key(key: &str) -> String {
    if is_unquoted_key(key) {
        key.to_string()
    } else {
        format!("{DOUBLE_QUOTE}{}{DOUBLE_QUOTE}", escape_string(key))
    }
}

#[must_use]
pub fn join_scalars<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    delimiter: Delimiter,
) -> String {
    let mut out = String::new();
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            out.push(delimiter.as_char());
        }
        out.push_str(&render_scalar(value, delimiter));
    }
    out
}

// `key[#N|]{f1|f2}:` in full generality; marker and delimiter suffix are
// omitted when unset or comma, the key for root and list-item forms.
#[must_use]
pub fn format_header(
    length: usize,
    key: Option<&str>,
    fields: Option<&[String]>,
    delimiter: Delimiter,
    length_marker: Option<char>,
) -> String {
    let mut header = String::new();

    if let Some(key) = key {
        header.push_str(&render_key(key));
    }

    header.push('[');
    if let Some(marker) = length_marker {
        header.push(marker);
    }
    let _ = write!(header, "{length}");
    header.push_str(delimiter.header_suffix());
    header.push(']');

    if let Some(fields) = fields {
        header.push('{');
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 {
                header.push(delimiter.as_char());
            }
            header.push_str(&render_key(field));
        }
        header.push('}');
    }

    header.push(':');
    header
}
