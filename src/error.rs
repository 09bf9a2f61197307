use thiserror::Error;

/// Errors surfaced while turning a value tree into TOON text.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Options failed validation before the encoder ran.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// A native value had no representation in the value tree.
    #[error("unsupported value: {message}")]
    UnsupportedValue { message: String },

    /// Input could not be coerced into the canonical value tree.
    #[error("normalization failed: {message}")]
    NormalizationFailure { message: String },
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

impl EncodeError {
    #[must_use]
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn normalization(message: impl Into<String>) -> Self {
        Self::NormalizationFailure {
            message: message.into(),
        }
    }
}

/// Errors surfaced while parsing TOON text.
///
/// The variant is the error kind; each carries the originating line number
/// or an input snippet. The decoder never recovers or returns partial
/// results.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Options failed validation before the decoder ran.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// Tabs or off-step indentation under strict mode.
    #[error("Line {line}: {message}")]
    IndentationViolation { line: usize, message: String },

    /// A blank line interrupted an array body under strict mode.
    #[error("Line {line}: blank lines inside {context} are not allowed in strict mode")]
    BlankLineInArray { line: usize, context: &'static str },

    /// The declared `[N]` did not match the number of elements found.
    #[error("expected {expected} {unit}, but got {actual}")]
    ArrayLengthMismatch {
        expected: usize,
        actual: usize,
        unit: &'static str,
    },

    /// A tabular row carried a different number of values than the header
    /// declares fields.
    #[error("expected {expected} values in tabular row, but got {actual}")]
    RowWidthMismatch { expected: usize, actual: usize },

    /// A quoted string without a closing quote.
    #[error("unterminated string: missing closing quote in `{snippet}`")]
    UnterminatedString { snippet: String },

    /// An escape sequence other than `\\`, `\"`, `\n`, `\r`, `\t`.
    #[error("invalid escape sequence: {message}")]
    InvalidEscape { message: String },

    /// An array header that could not be read as `[N]{fields}:`.
    #[error("malformed array header `{snippet}`: {message}")]
    MalformedHeader { snippet: String, message: String },

    /// Path expansion hit conflicting shapes under strict mode.
    #[error("path expansion conflict at `{path}`: {message}")]
    PathConflict { path: String, message: String },

    /// Anything else the grammar rejects.
    #[error("{message}")]
    ParseFailure { message: String },
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    #[must_use]
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn tabs_in_indentation(line: usize) -> Self {
        Self::IndentationViolation {
            line,
            message: "tab characters are not allowed in indentation in strict mode".to_string(),
        }
    }

    #[must_use]
    pub fn indentation_step(line: usize, expected: usize, found: usize) -> Self {
        Self::IndentationViolation {
            line,
            message: format!(
                "indentation must be an exact multiple of {expected}, but found {found} spaces"
            ),
        }
    }

    #[must_use]
    pub const fn blank_line(line: usize, context: &'static str) -> Self {
        Self::BlankLineInArray { line, context }
    }

    #[must_use]
    pub const fn length_mismatch(expected: usize, actual: usize, unit: &'static str) -> Self {
        Self::ArrayLengthMismatch {
            expected,
            actual,
            unit,
        }
    }

    #[must_use]
    pub const fn row_width(expected: usize, actual: usize) -> Self {
        Self::RowWidthMismatch { expected, actual }
    }

    #[must_use]
    pub fn unterminated(snippet: impl Into<String>) -> Self {
        Self::UnterminatedString {
            snippet: snippet.into(),
        }
    }

    #[must_use]
    pub fn invalid_escape(message: impl Into<String>) -> Self {
        Self::InvalidEscape {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn malformed_header(snippet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            snippet: snippet.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn path_conflict(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathConflict {
            path: path.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn parse_at(line: usize, message: impl std::fmt::Display) -> Self {
        Self::ParseFailure {
            message: format!("Line {line}: {message}"),
        }
    }
}
