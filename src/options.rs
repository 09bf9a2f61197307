use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::Value;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::telemetry::TelemetryHandler;

// Returning Some substitutes the value (normalized again and revisited),
// None drops the entry; the root is kept as-is.
pub type EncodeAdapter =
    Arc<dyn Fn(&str, &Value, &[PathSegment]) -> Option<Value> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
            Self::Pipe => '|',
        }
    }

    // What the length header carries after the count: nothing for the
    // default comma, the delimiter char otherwise.
    #[must_use]
    pub const fn header_suffix(self) -> &'static str {
        match self {
            Self::Comma => "",
            Self::Tab => "\t",
            Self::Pipe => "|",
        }
    }

    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Self::Comma),
            '\t' => Some(Self::Tab),
            '|' => Some(Self::Pipe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFolding {
    #[default]
    Off,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandPaths {
    #[default]
    Off,
    Safe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrder {
    // Root applies at the document root only, and only when it names every
    // root key exactly. ByPath orders are keyed by entry path; listed keys
    // come first, keys an order omits keep canonical order.
    Root(Vec<String>),
    ByPath(HashMap<Vec<String>, Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Clone, Default)]
pub struct EncodeOptions {
    pub indent: Option<usize>,
    pub delimiter: Option<Delimiter>,
    pub length_marker: Option<char>,
    pub key_order: Option<KeyOrder>,
    pub key_folding: Option<KeyFolding>,
    pub flatten_depth: Option<usize>,
    pub adapter: Option<EncodeAdapter>,
    pub telemetry: Option<Arc<dyn TelemetryHandler>>,
}

#[derive(Clone, Default)]
pub struct DecodeOptions {
    pub indent: Option<usize>,
    pub strict: Option<bool>,
    pub expand_paths: Option<ExpandPaths>,
    // Accept legacy `[#N]` length headers carrying this marker; absent by
    // default, and marked headers are rejected without it.
    pub length_marker: Option<char>,
    pub telemetry: Option<Arc<dyn TelemetryHandler>>,
}

#[derive(Clone)]
pub struct ResolvedEncodeOptions {
    pub indent: usize,
    pub delimiter: Delimiter,
    pub length_marker: Option<char>,
    pub key_order: Option<KeyOrder>,
    pub key_folding: KeyFolding,
    pub flatten_depth: usize,
    pub adapter: Option<EncodeAdapter>,
    pub telemetry: Option<Arc<dyn TelemetryHandler>>,
}

#[derive(Clone)]
pub struct ResolvedDecodeOptions {
    pub indent: usize,
    pub strict: bool,
    pub expand_paths: ExpandPaths,
    pub length_marker: Option<char>,
    pub telemetry: Option<Arc<dyn TelemetryHandler>>,
}

pub fn resolve_encode_options(options: Option<EncodeOptions>) -> EncodeResult<ResolvedEncodeOptions> {
    let options = options.unwrap_or_default();

    let indent = options.indent.unwrap_or(2);
    if indent == 0 {
        return Err(EncodeError::invalid_options("indent must be at least 1"));
    }

    if let Some(marker) = options.length_marker {
        validate_length_marker(marker).map_err(EncodeError::invalid_options)?;
    }

    if let Some(key_order) = &options.key_order {
        validate_key_order(key_order).map_err(EncodeError::invalid_options)?;
    }

    Ok(ResolvedEncodeOptions {
        indent,
        delimiter: options.delimiter.unwrap_or_default(),
        length_marker: options.length_marker,
        key_order: options.key_order,
        key_folding: options.key_folding.unwrap_or_default(),
        flatten_depth: options.flatten_depth.unwrap_or(usize::MAX),
        adapter: options.adapter,
        telemetry: options.telemetry,
    })
}

pub fn resolve_decode_options(options: Option<DecodeOptions>) -> DecodeResult<ResolvedDecodeOptions> {
    let options = options.unwrap_or_default();

    let indent = options.indent.unwrap_or(2);
    if indent == 0 {
        return Err(DecodeError::invalid_options("indent must be at least 1"));
    }

    if let Some(marker) = options.length_marker {
        validate_length_marker(marker).map_err(DecodeError::invalid_options)?;
    }

    Ok(ResolvedDecodeOptions {
        indent,
        strict: options.strict.unwrap_or(true),
        expand_paths: options.expand_paths.unwrap_or_default(),
        length_marker: options.length_marker,
        telemetry: options.telemetry,
    })
}

fn validate_length_marker(marker: char) -> Result<(), String> {
    if marker.is_ascii_digit()
        || marker.is_whitespace()
        || matches!(marker, ',' | '|' | '[' | ']' | '{' | '}' | ':' | '"' | '-')
    {
        return Err(format!(
            "length marker {marker:?} would be ambiguous inside a length header"
        ));
    }
    Ok(())
}

fn validate_key_order(key_order: &KeyOrder) -> Result<(), String> {
    match key_order {
        KeyOrder::Root(keys) => check_unique(keys),
        KeyOrder::ByPath(orders) => orders.values().try_for_each(|keys| check_unique(keys)),
    }
}

fn check_unique(keys: &[String]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(format!("key order lists {key:?} more than once"));
        }
    }
    Ok(())
}
