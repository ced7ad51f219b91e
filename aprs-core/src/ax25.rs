//! AX.25 UI-frame construction: address field, FCS, bit-stuffing and the
//! on-air flag/preamble framing.

use crate::callsign::Callsign;
use crate::errors::{AprsError, Result};

/// Control field for an unnumbered-information (UI) frame.
const CONTROL_UI: u8 = 0x03;
/// Protocol ID meaning "no layer 3" (used by APRS).
const PROTOCOL_NO_LAYER3: u8 = 0xF0;

/// The literal 8-bit HDLC flag pattern, MSB-first as written here but
/// emitted bit-by-bit in the order shown (never subject to bit-stuffing).
const FLAG_BITS: [bool; 8] = [false, true, true, true, true, true, true, false];

/// A parsed, validated digipeater path: up to 8 callsigns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigipeaterPath(Vec<Callsign>);

impl DigipeaterPath {
    pub fn parse(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }
        let entries: Vec<&str> = path.split(',').map(str::trim).collect();
        if entries.len() > 8 {
            return Err(AprsError::InvalidPath {
                path: path.to_string(),
                reason: format!("{} digipeaters exceeds the maximum of 8", entries.len()),
            });
        }
        let mut callsigns = Vec::with_capacity(entries.len());
        for entry in entries {
            let cs = Callsign::parse(entry).map_err(|e| AprsError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            callsigns.push(cs);
        }
        Ok(Self(callsigns))
    }

    pub fn callsigns(&self) -> &[Callsign] {
        &self.0
    }
}

/// Configuration for a single UI-frame build.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    pub source: Callsign,
    pub destination: Callsign,
    pub path: DigipeaterPath,
    pub payload: Vec<u8>,
    /// Number of leading flag octets in the preamble (spec default: 100).
    pub flag_count: usize,
}

/// Concatenate destination, source and path callsigns into the AX.25
/// address field, left-shifting every byte by one bit and setting the
/// address-extension terminator bit on the last byte.
pub fn encode_address(destination: &Callsign, source: &Callsign, path: &DigipeaterPath) -> Vec<u8> {
    let mut addr = Vec::with_capacity(7 * (2 + path.callsigns().len()));
    addr.extend_from_slice(&destination.encode());
    addr.extend_from_slice(&source.encode());
    for digi in path.callsigns() {
        addr.extend_from_slice(&digi.encode());
    }

    for byte in addr.iter_mut() {
        *byte <<= 1;
    }
    if let Some(last) = addr.last_mut() {
        *last |= 0x01;
    }
    addr
}

/// Concatenate address ‖ control ‖ protocol ‖ info into the frame body
/// that the FCS is computed over.
pub fn frame_body(address: &[u8], info: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(address.len() + 2 + info.len());
    body.extend_from_slice(address);
    body.push(CONTROL_UI);
    body.push(PROTOCOL_NO_LAYER3);
    body.extend_from_slice(info);
    body
}

/// ITU-T CRC-16 (polynomial 0x8408, reflected 0x1021), processed LSB-first
/// per byte, initial value 0xFFFF, inverted at the end.
pub fn fcs(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let input_bit = b & 1;
            let crc_bit = (crc & 1) as u8;
            crc >>= 1;
            if input_bit != crc_bit {
                crc ^= 0x8408;
            }
            b >>= 1;
        }
    }
    !crc
}

/// Expand bytes to bits, LSB first within each byte.
fn bytes_to_bits_lsb_first(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in 0..8 {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Insert a 0 after every run of five consecutive 1s.
pub fn bit_stuff(bits: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(bits.len() + bits.len() / 5 + 1);
    let mut ones_run = 0u32;
    for &bit in bits {
        out.push(bit);
        if bit {
            ones_run += 1;
            if ones_run == 5 {
                out.push(false);
                ones_run = 0;
            }
        } else {
            ones_run = 0;
        }
    }
    out
}

/// Build the complete bit sequence for one UI frame: 20 zero-bit preamble
/// ‖ `flag_count` flag octets ‖ bit-stuffed frame ‖ one closing flag octet.
pub fn build_frame(cfg: &FrameConfig) -> Result<Vec<bool>> {
    if cfg.payload.is_empty() || cfg.payload.len() > 256 {
        return Err(AprsError::InvalidPayload {
            len: cfg.payload.len(),
        });
    }

    let address = encode_address(&cfg.destination, &cfg.source, &cfg.path);
    let body = frame_body(&address, &cfg.payload);
    let checksum = fcs(&body);

    let mut frame = body;
    // FCS bytes are appended low byte first; each byte is still
    // transmitted LSB-first below, matching the AX.25 on-air order.
    frame.push((checksum & 0xFF) as u8);
    frame.push((checksum >> 8) as u8);

    let raw_bits = bytes_to_bits_lsb_first(&frame);
    let stuffed = bit_stuff(&raw_bits);

    let mut result = Vec::with_capacity(20 + cfg.flag_count * 8 + stuffed.len() + 8);
    result.extend(std::iter::repeat(false).take(20));
    for _ in 0..cfg.flag_count {
        result.extend_from_slice(&FLAG_BITS);
    }
    result.extend_from_slice(&stuffed);
    result.extend_from_slice(&FLAG_BITS);
    Ok(result)
}
