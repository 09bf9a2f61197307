#![forbid(unsafe_code)]

//! TOON (Token-Oriented Object Notation) codec: a compact indentation-based
//! text format for feeding structured data to language models.
//!
//! [`encode`] turns a [`Value`] tree into TOON text, [`decode`] parses it
//! back; for any value, `try_decode(try_encode(v)?)` returns the normalized
//! form of `v`.

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod shared;
pub mod telemetry;

pub use decode::{decode, decode_from_lines, try_decode, try_decode_from_lines};
pub use encode::{encode, encode_lines, try_encode, try_encode_lines};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use options::{
    DecodeOptions, Delimiter, EncodeAdapter, EncodeOptions, ExpandPaths, KeyFolding, KeyOrder,
    PathSegment,
};
pub use telemetry::{CodecOp, TelemetryHandler, TelemetryReport};

/// Ordered map backing [`Value::Obj`]: unique string keys, insertion order
/// is document order.
pub type Map = indexmap::IndexMap<String, Value>;

/// The canonical value tree shared by encoder and decoder.
///
/// Normalized trees contain only finite numbers, string keys, and these
/// seven shapes; see [`encode::normalize::normalize_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Obj(Map),
}

impl Value {
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Obj(_))
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Obj(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        encode::normalize::normalize_number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Obj(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || encode::normalize::normalize_number(number.as_f64().unwrap_or(f64::NAN)),
                Self::Int,
            ),
            serde_json::Value::String(value) => Self::Str(value),
            serde_json::Value::Array(values) => {
                Self::List(values.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key, Self::from(value));
                }
                Self::Obj(map)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Int(number) => Self::Number(number.into()),
            Value::Float(number) => {
                serde_json::Number::from_f64(number).map_or(Self::Null, Self::Number)
            }
            Value::Str(value) => Self::String(value),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Obj(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key, Self::from(value));
                }
                Self::Object(map)
            }
        }
    }
}

/// Convenience wrapper: parse JSON text and encode it as TOON.
///
/// For lower-level control, parse the JSON yourself and call [`try_encode`].
///
/// # Errors
///
/// Returns an error when the JSON input is invalid.
pub fn json_to_toon(json: &str) -> EncodeResult<String> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|err| EncodeError::normalization(format!("invalid JSON input: {err}")))?;
    try_encode(value, None)
}

/// Convenience wrapper: decode TOON text and return compact JSON.
///
/// # Errors
///
/// Returns an error when the TOON input is invalid.
pub fn toon_to_json(toon: &str) -> DecodeResult<String> {
    let value = try_decode(toon, None)?;
    let value = serde_json::Value::from(value);
    serde_json::to_string(&value).map_err(|err| DecodeError::parse(err.to_string()))
}
