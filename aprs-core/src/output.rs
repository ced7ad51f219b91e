//! Bit-exact sample serialization for the three output formats.

use crate::config::OutputFormat;
use num_complex::Complex32;
use std::io::{self, Write};

/// Write samples in the requested format, native-endian, with no
/// container header (spec §6 / §9 "Endianness").
pub fn write_samples(
    format: OutputFormat,
    audio: &[f32],
    iq: Option<&[Complex32]>,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Pcm => write_pcm(audio, out),
        OutputFormat::F32 => write_f32_iq(iq.unwrap_or(&[]), out),
        OutputFormat::S8 => write_s8_iq(iq.unwrap_or(&[]), out),
    }
}

fn write_pcm(audio: &[f32], out: &mut dyn Write) -> io::Result<()> {
    for &sample in audio {
        out.write_all(&sample.to_ne_bytes())?;
    }
    Ok(())
}

fn write_f32_iq(iq: &[Complex32], out: &mut dyn Write) -> io::Result<()> {
    for sample in iq {
        out.write_all(&sample.re.to_ne_bytes())?;
        out.write_all(&sample.im.to_ne_bytes())?;
    }
    Ok(())
}

/// `x ∈ [-1, 1]` is encoded as `round_toward_zero(x * 127)`, interleaved
/// I then Q per sample.
fn write_s8_iq(iq: &[Complex32], out: &mut dyn Write) -> io::Result<()> {
    for sample in iq {
        out.write_all(&[f32_to_s8(sample.re), f32_to_s8(sample.im)])?;
    }
    Ok(())
}

fn f32_to_s8(x: f32) -> u8 {
    (x * 127.0).trunc().clamp(-128.0, 127.0) as i8 as u8
}
