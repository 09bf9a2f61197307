pub mod adapter;
pub mod encoders;
pub mod folding;
pub mod normalize;
pub mod primitives;

use std::time::Instant;

use crate::Value;
use crate::encode::adapter::apply_adapter;
use crate::encode::normalize::normalize_value;
use crate::error::EncodeResult;
use crate::options::{EncodeOptions, ResolvedEncodeOptions, resolve_encode_options};
use crate::telemetry::{CodecOp, TelemetryReport};

#[must_use]
pub fn encode(input: impl Into<Value>, options: Option<EncodeOptions>) -> String {
    try_encode(input, options).unwrap_or_else(|err| panic!("{err}"))
}

pub fn try_encode(input: impl Into<Value>, options: Option<EncodeOptions>) -> EncodeResult<String> {
    Ok(try_encode_lines(input, options)?.join("\n"))
}

#[must_use]
pub fn encode_lines(input: impl Into<Value>, options: Option<EncodeOptions>) -> Vec<String> {
    try_encode_lines(input, options).unwrap_or_else(|err| panic!("{err}"))
}

pub fn try_encode_lines(
    input: impl Into<Value>,
    options: Option<EncodeOptions>,
) -> EncodeResult<Vec<String>> {
    let resolved = resolve_encode_options(options)?;
    let value = input.into();
    let data_type = root_data_type(&value);

    if let Some(telemetry) = &resolved.telemetry {
        telemetry.on_start(CodecOp::Encode);
    }
    let started = Instant::now();

    let lines = encode_resolved(value, &resolved);

    if let Some(telemetry) = &resolved.telemetry {
        let size = lines.iter().map(String::len).sum::<usize>() + lines.len().saturating_sub(1);
        let report = TelemetryReport {
            duration: started.elapsed(),
            size,
            data_type,
        };
        telemetry.on_stop(CodecOp::Encode, &report);
    }

    Ok(lines)
}

fn encode_resolved(value: Value, options: &ResolvedEncodeOptions) -> Vec<String> {
    let normalized = normalize_value(value);
    let prepared = if let Some(adapter) = &options.adapter {
        apply_adapter(&normalized, adapter)
    } else {
        normalized
    };
    encoders::encode_value(&prepared, options)
}

const fn root_data_type(value: &Value) -> &'static str {
    match value {
        Value::Obj(_) => "object",
        Value::List(_) => "array",
        _ => "primitive",
    }
}
