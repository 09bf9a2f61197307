//! Instrumentation hooks invoked around encode and decode runs.
//!
//! Handlers are trait objects carried in the options; all callbacks are
//! synchronous, have empty default bodies, and may ignore every event.
//! Stateful handlers are responsible for their own synchronization.

use std::time::Duration;

pub const ENCODE_START: &str = "toon.encode.start";
pub const ENCODE_STOP: &str = "toon.encode.stop";
pub const ENCODE_EXCEPTION: &str = "toon.encode.exception";
pub const DECODE_START: &str = "toon.decode.start";
pub const DECODE_STOP: &str = "toon.decode.stop";
pub const DECODE_EXCEPTION: &str = "toon.decode.exception";

/// Which codec direction an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecOp {
    Encode,
    Decode,
}

impl CodecOp {
    #[must_use]
    pub const fn start_event(self) -> &'static str {
        match self {
            Self::Encode => ENCODE_START,
            Self::Decode => DECODE_START,
        }
    }

    #[must_use]
    pub const fn stop_event(self) -> &'static str {
        match self {
            Self::Encode => ENCODE_STOP,
            Self::Decode => DECODE_STOP,
        }
    }

    #[must_use]
    pub const fn exception_event(self) -> &'static str {
        match self {
            Self::Encode => ENCODE_EXCEPTION,
            Self::Decode => DECODE_EXCEPTION,
        }
    }
}

/// Measurements attached to stop and exception events.
///
/// `size` is the payload size in bytes: output for encode, input for
/// decode. `data_type` names the root shape (`"object"`, `"array"`,
/// `"primitive"`, or `"unknown"` when a run failed before producing one).
#[derive(Debug, Clone, Copy)]
pub struct TelemetryReport {
    pub duration: Duration,
    pub size: usize,
    pub data_type: &'static str,
}

pub trait TelemetryHandler: Send + Sync {
    fn on_start(&self, _op: CodecOp) {}

    fn on_stop(&self, _op: CodecOp, _report: &TelemetryReport) {}

    /// Fires before the error is returned to the caller.
    fn on_exception(&self, _op: CodecOp, _report: &TelemetryReport, _error: &dyn std::error::Error) {
    }
}
