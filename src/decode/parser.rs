//! Per-line scanners for the fixed TOON shapes.
//!
//! These are handwritten byte scanners rather than regexes: the shapes are
//! small and fixed (`key "[" digits ("\t"|"|")? "]" ("{" fields "}")? ":"`),
//! and quote-awareness has to thread through every one of them.

use crate::Value;
use crate::encode::normalize::normalize_number;
use crate::error::{DecodeError, DecodeResult};
use crate::options::Delimiter;
use crate::shared::constants::{
    BACKSLASH, CLOSE_BRACE, CLOSE_BRACKET, COLON, DOUBLE_QUOTE, FALSE_LITERAL, NULL_LITERAL,
    OPEN_BRACE, OPEN_BRACKET, PIPE, TAB, TRUE_LITERAL,
};
use crate::shared::literal_utils::{is_boolean_or_null_literal, is_numeric_literal};
use crate::shared::string_utils::{find_closing_quote, find_unquoted_char, unescape_string};

/// Parsed form of an array length header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    pub key: Option<String>,
    pub key_was_quoted: bool,
    pub length: usize,
    pub delimiter: Delimiter,
    pub fields: Option<Vec<String>>,
}

/// A header line together with any inline values after the colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeaderLine {
    pub header: ArrayHeader,
    pub inline_values: Option<String>,
}

/// Scan a line for the array header shape.
///
/// Returns `Ok(None)` when the line is not an array header at all (a plain
/// key-value entry); the caller re-parses it. A line that *is* a header but
/// is malformed — bad length, missing bracket or colon — is a hard error,
/// since unquoted keys can never contain `[`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedHeader`], [`DecodeError::UnterminatedString`]
/// or [`DecodeError::InvalidEscape`] as described above.
pub fn parse_array_header_line(
    content: &str,
    length_marker: Option<char>,
) -> DecodeResult<Option<ArrayHeaderLine>> {
    let mut key: Option<String> = None;
    let mut key_was_quoted = false;

    let bracket_start = if content.starts_with(DOUBLE_QUOTE) {
        let closing = find_closing_quote(content, 0)
            .ok_or_else(|| DecodeError::unterminated(content))?;
        if !content[closing + 1..].starts_with(OPEN_BRACKET) {
            return Ok(None);
        }
        key = Some(unescape_string(&content[1..closing])?);
        key_was_quoted = true;
        closing + 1
    } else {
        let bytes = content.as_bytes();
        let mut pos = 0usize;
        while pos < bytes.len()
            && bytes[pos] != COLON as u8
            && bytes[pos] != OPEN_BRACKET as u8
            && bytes[pos] != DOUBLE_QUOTE as u8
        {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != OPEN_BRACKET as u8 {
            return Ok(None);
        }
        let raw_key = content[..pos].trim();
        if !raw_key.is_empty() {
            key = Some(raw_key.to_string());
        }
        pos
    };

    let bracket_end = content[bracket_start..]
        .find(CLOSE_BRACKET)
        .map(|idx| bracket_start + idx)
        .ok_or_else(|| DecodeError::malformed_header(content, "missing closing bracket"))?;

    let segment = &content[bracket_start + 1..bracket_end];
    let (length, delimiter) = parse_bracket_segment(segment, length_marker)
        .map_err(|message| DecodeError::malformed_header(content, message))?;

    let mut pos = bracket_end + 1;
    let mut fields: Option<Vec<String>> = None;
    if content[pos..].starts_with(OPEN_BRACE) {
        let close = find_unquoted_char(content, CLOSE_BRACE, pos + 1)
            .ok_or_else(|| DecodeError::malformed_header(content, "missing closing brace"))?;
        let raw_fields = &content[pos + 1..close];
        let parsed = split_delimited(raw_fields, delimiter)
            .into_iter()
            .map(|field| parse_string_literal(field.trim()))
            .collect::<DecodeResult<Vec<_>>>()?;
        fields = Some(parsed);
        pos = close + 1;
    }

    if !content[pos..].starts_with(COLON) {
        return Err(DecodeError::malformed_header(
            content,
            "missing colon after length header",
        ));
    }

    let after = content[pos + 1..].trim();
    let inline_values = if after.is_empty() {
        None
    } else {
        Some(after.to_string())
    };

    Ok(Some(ArrayHeaderLine {
        header: ArrayHeader {
            key,
            key_was_quoted,
            length,
            delimiter,
            fields,
        },
        inline_values,
    }))
}

/// Read the bracket interior: optional length marker, digits, optional
/// trailing delimiter marker.
///
/// # Errors
///
/// Returns a message when the remaining text is not a plain length — in
/// particular for marked headers (`#3`) when no marker was configured.
pub fn parse_bracket_segment(
    segment: &str,
    length_marker: Option<char>,
) -> Result<(usize, Delimiter), String> {
    let mut rest = segment;
    let mut delimiter = Delimiter::Comma;

    if let Some(stripped) = rest.strip_suffix(TAB) {
        delimiter = Delimiter::Tab;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_suffix(PIPE) {
        delimiter = Delimiter::Pipe;
        rest = stripped;
    }

    if let Some(marker) = length_marker {
        if let Some(stripped) = rest.strip_prefix(marker) {
            rest = stripped;
        }
    }

    if rest.is_empty() || !rest.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(format!("invalid array length `{segment}`"));
    }

    rest.parse::<usize>()
        .map(|length| (length, delimiter))
        .map_err(|_| format!("invalid array length `{segment}`"))
}

/// Split on the delimiter, respecting quoted regions and escapes; tokens
/// are trimmed.
#[must_use]
pub fn split_delimited(input: &str, delimiter: Delimiter) -> Vec<String> {
    let delimiter = delimiter.as_char();
    let mut values = Vec::new();
    let mut buffer = String::new();
    let mut in_quotes = false;
    let mut iter = input.chars();

    while let Some(ch) = iter.next() {
        if ch == BACKSLASH && in_quotes {
            buffer.push(ch);
            if let Some(next) = iter.next() {
                buffer.push(next);
            }
            continue;
        }

        if ch == DOUBLE_QUOTE {
            in_quotes = !in_quotes;
            buffer.push(ch);
            continue;
        }

        if ch == delimiter && !in_quotes {
            values.push(buffer.trim().to_string());
            buffer.clear();
            continue;
        }

        buffer.push(ch);
    }

    if !buffer.is_empty() || !values.is_empty() {
        values.push(buffer.trim().to_string());
    }

    values
}

/// Parse a bare token into a scalar value.
///
/// Bool/null literals and well-formed numbers win; quoted strings are
/// unescaped; leading-zero digit runs and everything else stay strings.
///
/// # Errors
///
/// Returns an error for malformed quoted strings.
pub fn parse_scalar_token(token: &str) -> DecodeResult<Value> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Ok(Value::Str(String::new()));
    }

    if trimmed.starts_with(DOUBLE_QUOTE) {
        return Ok(Value::Str(parse_string_literal(trimmed)?));
    }

    if is_boolean_or_null_literal(trimmed) {
        return Ok(match trimmed {
            TRUE_LITERAL => Value::Bool(true),
            FALSE_LITERAL => Value::Bool(false),
            _ => {
                debug_assert_eq!(trimmed, NULL_LITERAL);
                Value::Null
            }
        });
    }

    if is_numeric_literal(trimmed) {
        if trimmed.contains(['.', 'e', 'E']) {
            let parsed = trimmed.parse::<f64>().unwrap_or(f64::NAN);
            return Ok(normalize_number(parsed));
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Ok(Value::Int(number));
        }
        // Integer syntax too large for i64.
        let parsed = trimmed.parse::<f64>().unwrap_or(f64::NAN);
        return Ok(normalize_number(parsed));
    }

    Ok(Value::Str(trimmed.to_string()))
}

/// Parse a token that must be a string: quoted tokens are unescaped,
/// anything else is taken literally.
///
/// # Errors
///
/// Returns an error for an unterminated quote, trailing characters after
/// the closing quote, or an invalid escape.
pub fn parse_string_literal(token: &str) -> DecodeResult<String> {
    let trimmed = token.trim();

    if trimmed.starts_with(DOUBLE_QUOTE) {
        let closing = find_closing_quote(trimmed, 0)
            .ok_or_else(|| DecodeError::unterminated(trimmed))?;
        if closing != trimmed.len() - 1 {
            return Err(DecodeError::parse(format!(
                "unexpected characters after closing quote in `{trimmed}`"
            )));
        }
        return unescape_string(&trimmed[1..closing]);
    }

    Ok(trimmed.to_string())
}

/// Parse a quoted or unquoted key and its trailing colon. Returns the key,
/// the offset just past the colon, and whether the key was quoted.
///
/// # Errors
///
/// Returns an error when the key is malformed or the colon is missing.
pub fn parse_key_token(content: &str) -> DecodeResult<(String, usize, bool)> {
    if content.starts_with(DOUBLE_QUOTE) {
        let closing = find_closing_quote(content, 0)
            .ok_or_else(|| DecodeError::unterminated(content))?;
        let key = unescape_string(&content[1..closing])?;
        let after = closing + 1;
        if !content[after..].starts_with(COLON) {
            return Err(DecodeError::parse(format!(
                "missing colon after key in `{content}`"
            )));
        }
        return Ok((key, after + 1, true));
    }

    let colon = content.find(COLON).ok_or_else(|| {
        DecodeError::parse(format!("missing colon after key in `{content}`"))
    })?;
    let key = content[..colon].trim().to_string();
    Ok((key, colon + 1, false))
}

/// Whether a line opens a root-form (keyless) array.
#[must_use]
pub fn is_array_header_content(content: &str) -> bool {
    content.starts_with(OPEN_BRACKET) && find_unquoted_char(content, COLON, 0).is_some()
}

/// Whether a line carries an unquoted colon, i.e. looks like a key-value
/// entry.
#[must_use]
pub fn is_key_value_content(content: &str) -> bool {
    find_unquoted_char(content, COLON, 0).is_some()
}
