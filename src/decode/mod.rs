pub mod decoders;
pub mod expand;
pub mod node;
pub mod parser;
pub mod scanner;
pub mod validation;

use std::time::Instant;

use crate::Value;
use crate::decode::expand::expand_paths_safe;
use crate::decode::node::node_to_value;
use crate::error::DecodeResult;
use crate::options::{DecodeOptions, ExpandPaths, ResolvedDecodeOptions, resolve_decode_options};
use crate::telemetry::{CodecOp, TelemetryReport};

/// Decode a TOON string into a value tree.
///
/// # Errors
///
/// Returns an error for malformed input or strict-mode violations.
pub fn try_decode(input: &str, options: Option<DecodeOptions>) -> DecodeResult<Value> {
    let resolved = resolve_decode_options(options)?;
    let lines = input.split('\n').map(str::to_string);
    decode_with(lines, input.len(), &resolved)
}

/// Decode a TOON string into a value tree.
///
/// # Panics
///
/// Panics when decoding fails. Use [`try_decode`] for a fallible version.
#[must_use]
pub fn decode(input: &str, options: Option<DecodeOptions>) -> Value {
    try_decode(input, options).unwrap_or_else(|err| panic!("{err}"))
}

/// Decode TOON lines into a value tree.
///
/// # Errors
///
/// Returns an error for malformed input or strict-mode violations.
pub fn try_decode_from_lines(
    lines: impl IntoIterator<Item = String>,
    options: Option<DecodeOptions>,
) -> DecodeResult<Value> {
    let resolved = resolve_decode_options(options)?;
    let lines: Vec<String> = lines.into_iter().collect();
    let size = lines.iter().map(String::len).sum::<usize>() + lines.len().saturating_sub(1);
    decode_with(lines, size, &resolved)
}

/// Decode TOON lines into a value tree.
///
/// # Panics
///
/// Panics when decoding fails. Use [`try_decode_from_lines`] for a
/// fallible version.
#[must_use]
pub fn decode_from_lines(
    lines: impl IntoIterator<Item = String>,
    options: Option<DecodeOptions>,
) -> Value {
    try_decode_from_lines(lines, options).unwrap_or_else(|err| panic!("{err}"))
}

fn decode_with(
    lines: impl IntoIterator<Item = String>,
    size: usize,
    options: &ResolvedDecodeOptions,
) -> DecodeResult<Value> {
    if let Some(telemetry) = &options.telemetry {
        telemetry.on_start(CodecOp::Decode);
    }
    let started = Instant::now();

    match run_decode(lines, options) {
        Ok(value) => {
            if let Some(telemetry) = &options.telemetry {
                let report = TelemetryReport {
                    duration: started.elapsed(),
                    size,
                    data_type: root_data_type(&value),
                };
                telemetry.on_stop(CodecOp::Decode, &report);
            }
            Ok(value)
        }
        Err(err) => {
            if let Some(telemetry) = &options.telemetry {
                let report = TelemetryReport {
                    duration: started.elapsed(),
                    size,
                    data_type: "unknown",
                };
                telemetry.on_exception(CodecOp::Decode, &report, &err);
            }
            Err(err)
        }
    }
}

fn run_decode(
    lines: impl IntoIterator<Item = String>,
    options: &ResolvedDecodeOptions,
) -> DecodeResult<Value> {
    let mut node = decoders::decode_document(lines, options)?;

    if options.expand_paths == ExpandPaths::Safe {
        node = expand_paths_safe(node, options.strict)?;
    }

    Ok(node_to_value(node))
}

const fn root_data_type(value: &Value) -> &'static str {
    match value {
        Value::Obj(_) => "object",
        Value::List(_) => "array",
        _ => "primitive",
    }
}
