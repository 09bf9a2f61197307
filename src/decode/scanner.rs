use crate::error::{DecodeError, DecodeResult};
use crate::shared::constants::{SPACE, TAB};

pub type Depth = usize;

/// One non-blank physical line: leading-space count, remaining content,
/// the depth derived from the indent step, and the 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub indent: usize,
    pub content: String,
    pub depth: Depth,
    pub line_number: usize,
}

/// Position of a blank line, kept for array-body validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankLineInfo {
    pub line_number: usize,
    pub indent: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub line_number: usize,
    pub blank_lines: Vec<BlankLineInfo>,
}

impl ScanState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Classify one raw line, enforcing strict-mode indentation rules.
///
/// Blank lines are recorded in the scan state and yield `None`.
///
/// # Errors
///
/// In strict mode, returns [`DecodeError::IndentationViolation`] for tabs
/// in the indent region or an indent that is not a multiple of
/// `indent_size`.
pub fn parse_line(
    raw: &str,
    state: &mut ScanState,
    indent_size: usize,
    strict: bool,
) -> DecodeResult<Option<ParsedLine>> {
    state.line_number += 1;
    let line_number = state.line_number;

    let bytes = raw.as_bytes();
    let mut indent = 0usize;
    while indent < bytes.len() && bytes[indent] == SPACE as u8 {
        indent += 1;
    }

    let content = &raw[indent..];
    if content.trim().is_empty() {
        state.blank_lines.push(BlankLineInfo {
            line_number,
            indent,
        });
        return Ok(None);
    }

    if strict {
        let mut whitespace_end = indent;
        while whitespace_end < bytes.len()
            && (bytes[whitespace_end] == SPACE as u8 || bytes[whitespace_end] == TAB as u8)
        {
            whitespace_end += 1;
        }
        if raw[..whitespace_end].contains(TAB) {
            return Err(DecodeError::tabs_in_indentation(line_number));
        }

        if indent % indent_size != 0 {
            return Err(DecodeError::indentation_step(line_number, indent_size, indent));
        }
    }

    Ok(Some(ParsedLine {
        indent,
        content: content.to_string(),
        depth: indent / indent_size,
        line_number,
    }))
}

/// Scan every line of the source, skipping blanks but recording them.
///
/// # Errors
///
/// Propagates strict-mode indentation violations.
pub fn parse_lines(
    source: impl IntoIterator<Item = String>,
    indent_size: usize,
    strict: bool,
    state: &mut ScanState,
) -> DecodeResult<Vec<ParsedLine>> {
    let mut lines = Vec::new();
    for raw in source {
        if let Some(parsed) = parse_line(&raw, state, indent_size, strict)? {
            lines.push(parsed);
        }
    }
    Ok(lines)
}

/// Forward-only cursor over the scanned lines.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<ParsedLine>,
    index: usize,
    blank_lines: Vec<BlankLineInfo>,
}

impl LineCursor {
    #[must_use]
    pub const fn new(lines: Vec<ParsedLine>, blank_lines: Vec<BlankLineInfo>) -> Self {
        Self {
            lines,
            index: 0,
            blank_lines,
        }
    }

    #[must_use]
    pub fn blank_lines(&self) -> &[BlankLineInfo] {
        &self.blank_lines
    }

    #[must_use]
    pub fn peek(&self) -> Option<&ParsedLine> {
        self.lines.get(self.index)
    }

    pub fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }

    pub fn next_line(&mut self) -> Option<ParsedLine> {
        let line = self.lines.get(self.index).cloned();
        if line.is_some() {
            self.index += 1;
        }
        line
    }

    /// The most recently consumed line, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ParsedLine> {
        self.index.checked_sub(1).and_then(|idx| self.lines.get(idx))
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.index >= self.lines.len()
    }
}
