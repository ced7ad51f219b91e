//! Configuration types and the single validation boundary for the
//! text-to-IQ pipeline.

pub use crate::ax25::DigipeaterPath;
use crate::callsign::Callsign;
use crate::errors::{AprsError, Result};
use std::str::FromStr;

/// Output sample format, set by the `format` configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interleaved I/Q pairs of native-endian `f32` at 2.4 MHz.
    F32,
    /// Interleaved I/Q pairs of signed `i8` at 2.4 MHz.
    S8,
    /// Raw 48 kHz mono `f32` audio, no FM stage.
    Pcm,
}

impl OutputFormat {
    /// Whether this format requires running the FM + interpolation stages.
    pub fn needs_iq(self) -> bool {
        !matches!(self, OutputFormat::Pcm)
    }
}

impl FromStr for OutputFormat {
    type Err = AprsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "f32" => Ok(OutputFormat::F32),
            "s8" => Ok(OutputFormat::S8),
            "pcm" => Ok(OutputFormat::Pcm),
            other => Err(AprsError::InvalidFormat {
                token: other.to_string(),
            }),
        }
    }
}

/// Default destination address, used when the caller doesn't override it.
pub const DEFAULT_DESTINATION: &str = "APRS";
/// Default digipeater path, used when the caller doesn't override it.
pub const DEFAULT_PATH: &str = "WIDE1-1,WIDE2-1";
/// Default leading flag-octet count in the AX.25 preamble.
pub const DEFAULT_FLAG_COUNT: usize = 100;

/// Fully validated configuration for one transmission. This is the single
/// point at which `AprsError::Invalid*` variants can be raised; every
/// downstream stage is a total function on a `TxConfig`.
#[derive(Debug, Clone)]
pub struct TxConfig {
    pub callsign: Callsign,
    pub destination: Callsign,
    pub path: DigipeaterPath,
    pub payload: Vec<u8>,
    pub format: OutputFormat,
    pub debug: bool,
    pub flag_count: usize,
}

impl TxConfig {
    /// Build and validate a `TxConfig` from raw string/byte inputs.
    ///
    /// `destination` defaults to `"APRS"` and `path` to
    /// `"WIDE1-1,WIDE2-1"` when `None`; the user-supplied destination is
    /// always honored when given (see `SPEC_FULL.md`'s Open Question
    /// resolution — there is no embedded entry point here that would
    /// silently override it).
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        callsign: &str,
        destination: Option<&str>,
        path: Option<&str>,
        payload: Vec<u8>,
        format: &str,
        debug: bool,
        flag_count: Option<usize>,
    ) -> Result<Self> {
        if payload.is_empty() || payload.len() > 256 {
            return Err(AprsError::InvalidPayload { len: payload.len() });
        }

        Ok(Self {
            callsign: Callsign::parse(callsign)?,
            destination: Callsign::parse(destination.unwrap_or(DEFAULT_DESTINATION))?,
            path: DigipeaterPath::parse(path.unwrap_or(DEFAULT_PATH))?,
            payload,
            format: format.parse()?,
            debug,
            flag_count: flag_count.unwrap_or(DEFAULT_FLAG_COUNT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = TxConfig::build("N0CALL-9", None, None, b"hi".to_vec(), "f32", false, None).unwrap();
        assert_eq!(cfg.destination.base(), "APRS");
        assert_eq!(cfg.path.callsigns().len(), 2);
        assert_eq!(cfg.flag_count, DEFAULT_FLAG_COUNT);
    }

    #[test]
    fn user_destination_is_honored_not_overridden() {
        let cfg = TxConfig::build(
            "N0CALL-9",
            Some("CUSTOM-2"),
            None,
            b"hi".to_vec(),
            "f32",
            false,
            None,
        )
        .unwrap();
        assert_eq!(cfg.destination.base(), "CUSTOM");
        assert_eq!(cfg.destination.ssid(), 2);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            TxConfig::build("N0CALL", None, None, b"hi".to_vec(), "wav", false, None),
            Err(AprsError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            TxConfig::build("N0CALL", None, None, Vec::new(), "f32", false, None),
            Err(AprsError::InvalidPayload { .. })
        ));
    }
}
