//! Callsign parsing and AX.25 address-field byte encoding
//!
//! See AX.25 spec 3.12, "Address-Field Encoding".

use crate::errors::{AprsError, Result};

/// A station callsign: up to six uppercase ASCII alphanumerics plus an SSID
/// in `0..=15`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callsign {
    base: String,
    ssid: u8,
}

impl Callsign {
    /// Parse `"BASE"` or `"BASE-SSID"`.
    pub fn parse(input: &str) -> Result<Self> {
        let (base, ssid) = match input.rsplit_once('-') {
            Some((base, ssid_str)) => {
                let ssid: i32 = ssid_str.parse().map_err(|_| AprsError::InvalidCallsign {
                    callsign: input.to_string(),
                    reason: format!("malformed SSID suffix \"-{ssid_str}\""),
                })?;
                if !(0..=15).contains(&ssid) {
                    return Err(AprsError::InvalidSsid {
                        callsign: input.to_string(),
                        ssid,
                    });
                }
                (base, ssid as u8)
            }
            None => (input, 0),
        };

        if base.is_empty() || base.len() > 6 {
            return Err(AprsError::InvalidCallsign {
                callsign: input.to_string(),
                reason: format!("base \"{base}\" must be 1..=6 characters"),
            });
        }
        if !base.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(AprsError::InvalidCallsign {
                callsign: input.to_string(),
                reason: "base must be ASCII alphanumeric".to_string(),
            });
        }

        Ok(Self {
            base: base.to_ascii_uppercase(),
            ssid,
        })
    }

    /// Build a callsign directly from already-validated parts (used for
    /// defaults like the "APRS" destination).
    pub fn new(base: &str, ssid: u8) -> Result<Self> {
        Self::parse(&format!("{base}-{ssid}"))
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Encode as the 7-byte AX.25 callsign field: six space-padded
    /// uppercase ASCII bytes followed by `b'0' + ssid`.
    pub fn encode(&self) -> [u8; 7] {
        let mut out = [b' '; 7];
        out[..self.base.len()].copy_from_slice(self.base.as_bytes());
        out[6] = b'0' + self.ssid;
        out
    }

    /// Recover `(base, ssid)` from an encoded 7-byte field, trimming
    /// trailing padding spaces. Used only by tests to check the
    /// encode/decode round trip.
    #[cfg(test)]
    pub fn decode(bytes: &[u8; 7]) -> (String, u8) {
        let base = String::from_utf8_lossy(&bytes[..6])
            .trim_end()
            .to_string();
        let ssid = bytes[6] - b'0';
        (base, ssid)
    }
}
