//! Error types for the AX.25/APRS signal-construction pipeline

use thiserror::Error;

/// Top-level error type for all aprs-core operations.
///
/// All variants are raised at configuration time, before any sample is
/// produced; the DSP stages downstream are total functions on validated
/// input and cannot fail at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AprsError {
    #[error("invalid callsign \"{callsign}\": {reason}")]
    InvalidCallsign { callsign: String, reason: String },

    #[error("invalid SSID {ssid} for callsign \"{callsign}\": must be in 0..=15")]
    InvalidSsid { callsign: String, ssid: i32 },

    #[error("invalid digipeater path \"{path}\": {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid payload ({len} bytes): must be 1..=256 bytes")]
    InvalidPayload { len: usize },

    #[error("invalid output format \"{token}\": expected one of f32, s8, pcm")]
    InvalidFormat { token: String },
}

/// Result type alias for aprs-core operations
pub type Result<T> = std::result::Result<T, AprsError>;
