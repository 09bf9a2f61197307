use crate::decode::node::{NodeValue, ObjectNode};
use crate::decode::parser::{
    ArrayHeader, ArrayHeaderLine, is_array_header_content, is_key_value_content,
    parse_array_header_line, parse_key_token, parse_scalar_token, split_delimited,
};
use crate::decode::scanner::{Depth, LineCursor, ParsedLine, ScanState, parse_lines};
use crate::decode::validation::{
    expect_length, expect_row_width, reject_blank_lines, reject_extra_list_items,
    reject_extra_tabular_rows,
};
use crate::error::{DecodeError, DecodeResult};
use crate::options::{Delimiter, ResolvedDecodeOptions};
use crate::shared::constants::{COLON, LIST_ITEM_MARKER, LIST_ITEM_PREFIX};
use crate::shared::string_utils::find_closing_quote;
use crate::Value;

#[derive(Debug, Clone, Copy)]
struct DecoderContext {
    strict: bool,
    length_marker: Option<char>,
}

/// Parse a whole document into the intermediate node tree.
///
/// # Errors
///
/// Returns the first grammar or strict-mode violation; there is no
/// recovery and no partial result.
pub fn decode_document(
    source: impl IntoIterator<Item = String>,
    options: &ResolvedDecodeOptions,
) -> DecodeResult<NodeValue> {
    let mut state = ScanState::new();
    let lines = parse_lines(source, options.indent, options.strict, &mut state)?;
    let mut cursor = LineCursor::new(lines, state.blank_lines);
    let ctx = DecoderContext {
        strict: options.strict,
        length_marker: options.length_marker,
    };

    let Some(first) = cursor.peek().cloned() else {
        return Ok(NodeValue::Object(ObjectNode::default()));
    };

    let root = if is_array_header_content(&first.content) {
        if let Some(header_line) = parse_array_header_line(&first.content, ctx.length_marker)? {
            cursor.advance();
            decode_array(header_line, &mut cursor, 0, ctx)?
        } else {
            decode_root_object(&first, &mut cursor, ctx)?
        }
    } else {
        decode_root_object(&first, &mut cursor, ctx)?
    };

    if ctx.strict {
        if let Some(line) = cursor.peek() {
            return Err(DecodeError::parse_at(
                line.line_number,
                "unexpected content after document root",
            ));
        }
    }

    Ok(root)
}

fn decode_root_object(
    first: &ParsedLine,
    cursor: &mut LineCursor,
    ctx: DecoderContext,
) -> DecodeResult<NodeValue> {
    cursor.advance();

    if cursor.at_end() && !is_key_value_line(first) {
        return Ok(NodeValue::Scalar(parse_scalar_token(&first.content)?));
    }

    let mut root = ObjectNode::default();
    decode_entry(&first.content, cursor, 0, ctx, &mut root)?;

    while let Some(line) = cursor.peek().cloned() {
        if line.depth != 0 {
            break;
        }
        cursor.advance();
        decode_entry(&line.content, cursor, 0, ctx, &mut root)?;
    }

    Ok(NodeValue::Object(root))
}

/// Parse one object entry whose first line is `content`, consuming any
/// continuation lines the entry owns.
fn decode_entry(
    content: &str,
    cursor: &mut LineCursor,
    base_depth: Depth,
    ctx: DecoderContext,
    out: &mut ObjectNode,
) -> DecodeResult<()> {
    if let Some(header_line) = parse_array_header_line(content, ctx.length_marker)? {
        let Some(key) = header_line.header.key.clone() else {
            return Err(DecodeError::parse(format!(
                "array header without key in object position: `{content}`"
            )));
        };
        let was_quoted = header_line.header.key_was_quoted;
        let value = decode_array(header_line, cursor, base_depth, ctx)?;
        out.push(key, value, was_quoted);
        return Ok(());
    }

    let (key, rest_start, was_quoted) = parse_key_token(content)?;
    let rest = content[rest_start..].trim();

    if rest.is_empty() {
        if let Some(next) = cursor.peek() {
            if next.depth > base_depth {
                let nested = decode_object_fields(cursor, base_depth + 1, ctx)?;
                out.push(key, NodeValue::Object(nested), was_quoted);
                return Ok(());
            }
        }
        out.push(key, NodeValue::Object(ObjectNode::default()), was_quoted);
        return Ok(());
    }

    out.push(key, NodeValue::Scalar(parse_scalar_token(rest)?), was_quoted);
    Ok(())
}

/// Parse the fields of a nested object. The first line fixes the field
/// depth; parsing stops at the first line above or below it.
fn decode_object_fields(
    cursor: &mut LineCursor,
    base_depth: Depth,
    ctx: DecoderContext,
) -> DecodeResult<ObjectNode> {
    let mut obj = ObjectNode::default();
    let mut field_depth: Option<Depth> = None;

    while let Some(line) = cursor.peek().cloned() {
        if line.depth < base_depth {
            break;
        }
        let depth = *field_depth.get_or_insert(line.depth);
        if line.depth != depth {
            break;
        }
        cursor.advance();
        decode_entry(&line.content, cursor, line.depth, ctx, &mut obj)?;
    }

    Ok(obj)
}

/// Dispatch a parsed header to the inline, tabular, or list shape.
fn decode_array(
    header_line: ArrayHeaderLine,
    cursor: &mut LineCursor,
    base_depth: Depth,
    ctx: DecoderContext,
) -> DecodeResult<NodeValue> {
    let ArrayHeaderLine {
        header,
        inline_values,
    } = header_line;

    if let Some(inline) = inline_values {
        let items = decode_inline_values(&header, &inline, ctx)?;
        return Ok(NodeValue::Array(items));
    }

    if let Some(fields) = header.fields.clone() {
        if !fields.is_empty() {
            let rows = decode_tabular_rows(&header, &fields, cursor, base_depth, ctx)?;
            return Ok(NodeValue::Array(rows));
        }
    }

    let items = decode_list_items(&header, cursor, base_depth, ctx)?;
    Ok(NodeValue::Array(items))
}

fn decode_inline_values(
    header: &ArrayHeader,
    inline: &str,
    ctx: DecoderContext,
) -> DecodeResult<Vec<NodeValue>> {
    let mut delimiter = header.delimiter;
    // Safety fallback: a declared-comma inline that carries tabs and no
    // commas is read as tab-separated.
    if delimiter == Delimiter::Comma && !inline.contains(',') && inline.contains('\t') {
        delimiter = Delimiter::Tab;
    }

    let tokens = split_delimited(inline, delimiter);
    let values = tokens
        .iter()
        .map(|token| parse_scalar_token(token))
        .collect::<DecodeResult<Vec<Value>>>()?;

    expect_length(values.len(), header.length, "inline array items", ctx.strict)?;

    Ok(values.into_iter().map(NodeValue::Scalar).collect())
}

fn decode_tabular_rows(
    header: &ArrayHeader,
    fields: &[String],
    cursor: &mut LineCursor,
    base_depth: Depth,
    ctx: DecoderContext,
) -> DecodeResult<Vec<NodeValue>> {
    let row_depth = base_depth + 1;
    let mut rows: Vec<NodeValue> = Vec::new();
    let mut start_line: Option<usize> = None;
    let mut end_line: Option<usize> = None;

    while rows.len() < header.length {
        let Some(line) = cursor.peek().cloned() else {
            break;
        };
        if line.depth != row_depth {
            break;
        }

        start_line.get_or_insert(line.line_number);
        end_line = Some(line.line_number);
        cursor.advance();

        let tokens = split_delimited(&line.content, header.delimiter);
        expect_row_width(tokens.len(), fields.len(), ctx.strict)?;

        let values = tokens
            .iter()
            .map(|token| parse_scalar_token(token))
            .collect::<DecodeResult<Vec<Value>>>()?;

        let mut row = ObjectNode::default();
        for (idx, field) in fields.iter().enumerate() {
            let value = values.get(idx).cloned().unwrap_or(Value::Null);
            row.push(field.clone(), NodeValue::Scalar(value), false);
        }
        rows.push(NodeValue::Object(row));
    }

    expect_length(rows.len(), header.length, "tabular rows", ctx.strict)?;

    if let (Some(start), Some(end)) = (start_line, end_line) {
        reject_blank_lines(start, end, cursor.blank_lines(), ctx.strict, "tabular array")?;
    }

    reject_extra_tabular_rows(cursor.peek(), row_depth, header, ctx.strict)?;
    Ok(rows)
}

fn decode_list_items(
    header: &ArrayHeader,
    cursor: &mut LineCursor,
    base_depth: Depth,
    ctx: DecoderContext,
) -> DecodeResult<Vec<NodeValue>> {
    let item_depth = base_depth + 1;
    let mut items: Vec<NodeValue> = Vec::new();
    let mut start_line: Option<usize> = None;
    let mut end_line: Option<usize> = None;

    while items.len() < header.length {
        let Some(line) = cursor.peek().cloned() else {
            break;
        };
        if line.depth != item_depth || !is_list_item_line(&line.content) {
            break;
        }

        start_line.get_or_insert(line.line_number);
        items.push(decode_list_item(cursor, item_depth, ctx)?);
        end_line = Some(cursor.current().map_or(line.line_number, |l| l.line_number));
    }

    expect_length(items.len(), header.length, "list array items", ctx.strict)?;

    if let (Some(start), Some(end)) = (start_line, end_line) {
        reject_blank_lines(start, end, cursor.blank_lines(), ctx.strict, "list array")?;
    }

    reject_extra_list_items(cursor.peek(), item_depth, header.length, ctx.strict)?;
    Ok(items)
}

fn decode_list_item(
    cursor: &mut LineCursor,
    item_depth: Depth,
    ctx: DecoderContext,
) -> DecodeResult<NodeValue> {
    let line = cursor
        .next_line()
        .ok_or_else(|| DecodeError::parse("expected a list item"))?;

    if line.content == LIST_ITEM_MARKER {
        return Ok(NodeValue::Object(ObjectNode::default()));
    }

    let rest = line.content.strip_prefix(LIST_ITEM_PREFIX).ok_or_else(|| {
        DecodeError::parse_at(
            line.line_number,
            format!("expected list item to start with `{LIST_ITEM_PREFIX}`"),
        )
    })?;

    if rest.trim().is_empty() {
        return Ok(NodeValue::Object(ObjectNode::default()));
    }

    // Anonymous nested array: `- [N]: …` or `- [N]:` with deeper items.
    if is_array_header_content(rest) {
        if let Some(header_line) = parse_array_header_line(rest, ctx.length_marker)? {
            return decode_array(header_line, cursor, item_depth, ctx);
        }
    }

    // Object item: the `- ` line carries the first field, continuation
    // lines one step deeper carry the rest.
    if is_key_value_content(rest) {
        let mut obj = ObjectNode::default();
        decode_entry(rest, cursor, item_depth + 1, ctx, &mut obj)?;

        while let Some(next) = cursor.peek().cloned() {
            if next.depth != item_depth + 1 || is_list_item_line(&next.content) {
                break;
            }
            cursor.advance();
            decode_entry(&next.content, cursor, item_depth + 1, ctx, &mut obj)?;
        }

        return Ok(NodeValue::Object(obj));
    }

    Ok(NodeValue::Scalar(parse_scalar_token(rest)?))
}

fn is_list_item_line(content: &str) -> bool {
    content == LIST_ITEM_MARKER || content.starts_with(LIST_ITEM_PREFIX)
}

/// Root-form disambiguation: does the first line look like a key-value
/// entry (quote-aware)?
fn is_key_value_line(line: &ParsedLine) -> bool {
    let content = line.content.as_str();
    if content.starts_with('"') {
        if let Some(closing) = find_closing_quote(content, 0) {
            return content[closing + 1..].contains(COLON);
        }
        return false;
    }
    content.contains(COLON)
}
