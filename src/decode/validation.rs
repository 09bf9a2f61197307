use crate::decode::parser::ArrayHeader;
use crate::decode::scanner::{BlankLineInfo, Depth, ParsedLine};
use crate::error::{DecodeError, DecodeResult};
use crate::options::Delimiter;
use crate::shared::constants::{COLON, LIST_ITEM_PREFIX};
use crate::shared::string_utils::find_unquoted_char;

/// Enforce a declared array length in strict mode.
///
/// # Errors
///
/// Returns [`DecodeError::ArrayLengthMismatch`] when strict and the counts
/// differ.
pub fn expect_length(
    actual: usize,
    expected: usize,
    unit: &'static str,
    strict: bool,
) -> DecodeResult<()> {
    if strict && actual != expected {
        return Err(DecodeError::length_mismatch(expected, actual, unit));
    }
    Ok(())
}

/// Enforce the tabular row width in strict mode.
///
/// # Errors
///
/// Returns [`DecodeError::RowWidthMismatch`] when strict and the counts
/// differ.
pub fn expect_row_width(actual: usize, expected: usize, strict: bool) -> DecodeResult<()> {
    if strict && actual != expected {
        return Err(DecodeError::row_width(expected, actual));
    }
    Ok(())
}

/// Reject a list item sitting just past the declared count.
///
/// # Errors
///
/// Returns [`DecodeError::ArrayLengthMismatch`] in strict mode.
pub fn reject_extra_list_items(
    next_line: Option<&ParsedLine>,
    item_depth: Depth,
    expected: usize,
    strict: bool,
) -> DecodeResult<()> {
    if strict {
        if let Some(line) = next_line {
            if line.depth == item_depth && line.content.starts_with(LIST_ITEM_PREFIX) {
                return Err(DecodeError::length_mismatch(
                    expected,
                    expected + 1,
                    "list array items",
                ));
            }
        }
    }
    Ok(())
}

/// Reject a data row sitting just past the declared tabular count.
///
/// # Errors
///
/// Returns [`DecodeError::ArrayLengthMismatch`] in strict mode.
pub fn reject_extra_tabular_rows(
    next_line: Option<&ParsedLine>,
    row_depth: Depth,
    header: &ArrayHeader,
    strict: bool,
) -> DecodeResult<()> {
    if strict {
        if let Some(line) = next_line {
            if line.depth == row_depth
                && !line.content.starts_with(LIST_ITEM_PREFIX)
                && is_data_row(&line.content, header.delimiter)
            {
                return Err(DecodeError::length_mismatch(
                    header.length,
                    header.length + 1,
                    "tabular rows",
                ));
            }
        }
    }
    Ok(())
}

/// Reject blank lines strictly inside an array body.
///
/// # Errors
///
/// Returns [`DecodeError::BlankLineInArray`] in strict mode.
pub fn reject_blank_lines(
    start_line: usize,
    end_line: usize,
    blank_lines: &[BlankLineInfo],
    strict: bool,
    context: &'static str,
) -> DecodeResult<()> {
    if !strict {
        return Ok(());
    }

    if let Some(first_blank) = blank_lines
        .iter()
        .find(|blank| blank.line_number > start_line && blank.line_number < end_line)
    {
        return Err(DecodeError::blank_line(first_blank.line_number, context));
    }

    Ok(())
}

/// A row has no unquoted colon, or its first unquoted delimiter precedes
/// the first unquoted colon.
fn is_data_row(content: &str, delimiter: Delimiter) -> bool {
    let colon_pos = find_unquoted_char(content, COLON, 0);
    let Some(colon_pos) = colon_pos else {
        return true;
    };

    find_unquoted_char(content, delimiter.as_char(), 0)
        .is_some_and(|delimiter_pos| delimiter_pos < colon_pos)
}
