//! Top-level pipeline glue: wires the framer, line coder, AFSK modulator,
//! FM modulator and polyphase interpolator into the end-to-end
//! text-to-IQ transmission path.

use crate::afsk::afsk_modulate;
use crate::ax25::{build_frame, FrameConfig};
use crate::config::TxConfig;
use crate::errors::Result;
use crate::filter::design_lowpass;
use crate::fm::FmModulator;
use crate::interpolator::PolyphaseFirInterpolator;
use crate::logging::{format_bit_trace, SignalLogger};
use crate::nrzi::nrzi_encode;
use crate::ringbuffer::RingBuffer;
use num_complex::Complex32;

/// Block size the pipeline feeds through the FM modulator at a time
/// (spec: `BUFSIZE`). The ring buffer is sized to `2 * BUFSIZE` to
/// tolerate worst-case transient occupancy.
pub const BUFSIZE: usize = 4096;

/// Interpolation factor from 48 kHz audio to 2.4 MHz complex baseband.
pub const INTERPOLATION: usize = 50;

/// Result of running the full pipeline for one payload.
#[derive(Debug, Clone)]
pub struct TxOutput {
    /// 48 kHz mono AFSK audio, always produced.
    pub audio: Vec<f32>,
    /// 2.4 MHz complex baseband, produced unless the output format is
    /// `pcm` (which skips the FM + interpolation stages entirely).
    pub iq: Option<Vec<Complex32>>,
    /// Structured diagnostic entries collected while building this
    /// transmission: always carries a `FRAME` info line, plus the raw
    /// framed bit sequence at `Debug` level when `cfg.debug` is set. The
    /// CLI forwards these through `aprs_cli`'s `StructuredLogger` via
    /// `forward_signal_log`.
    pub log: SignalLogger,
}

/// Owns the stateful middle of the pipeline: the FM modulator's running
/// phase, the ring buffer shared between it and the interpolator, and the
/// polyphase interpolator itself. Drives the spec's block-by-block
/// discipline (write ≤ `BUFSIZE` samples → interpolate → remove consumed
/// prefix → repeat) over a bounded audio waveform to completion.
pub struct TxPipeline {
    fm: FmModulator,
    ring: RingBuffer,
    interpolator: PolyphaseFirInterpolator,
}

impl TxPipeline {
    pub fn new(interpolation: usize, prototype_taps: &[f32]) -> Self {
        Self {
            fm: FmModulator::new(),
            ring: RingBuffer::with_capacity(2 * BUFSIZE),
            interpolator: PolyphaseFirInterpolator::new(interpolation, prototype_taps),
        }
    }

    /// FM-modulate and polyphase-interpolate `audio` to completion,
    /// returning the full complex baseband.
    pub fn run(&mut self, audio: &[f32]) -> Vec<Complex32> {
        let mut iq = Vec::new();
        let mut offset = 0;
        while offset < audio.len() {
            let input_len = BUFSIZE.min(audio.len() - offset);
            self.fm
                .modulate_into(&audio[offset..offset + input_len], &mut self.ring);

            let consumed = self.interpolator.interpolate(&self.ring, &mut iq);
            if consumed > 0 {
                self.ring.remove(consumed);
            }
            offset += input_len;
        }
        iq
    }
}

/// Build the 50x-interpolating low-pass prototype used by the spec's
/// default APRS configuration: `gain = L`, `Fs = L`, `cutoff = 0.5 -
/// trans/2`, `transition_width = 0.5 - 0.4`, a normalized design where the
/// sampling rate is set to the interpolation factor itself.
fn aprs_lowpass_prototype(interpolation: usize) -> Vec<f32> {
    let factor = interpolation as f64;
    let halfband = 0.5;
    let fractional_bw = 0.4;
    let trans_width = halfband - fractional_bw;
    let cutoff = halfband - trans_width / 2.0;
    design_lowpass(factor, factor, cutoff, trans_width)
}

/// Drive the FM modulator and polyphase interpolator over `audio` to
/// completion via a `TxPipeline`, following the spec's "write block →
/// interpolate → remove consumed prefix → repeat" discipline.
fn modulate_and_interpolate(audio: &[f32]) -> Vec<Complex32> {
    let taps = aprs_lowpass_prototype(INTERPOLATION);
    let mut pipeline = TxPipeline::new(INTERPOLATION, &taps);
    pipeline.run(audio)
}

/// Run the full text-to-IQ pipeline: frame the payload, line-code it,
/// render AFSK audio, and (unless the output format is `pcm`) FM-modulate
/// and polyphase-interpolate up to 2.4 MHz complex baseband.
pub fn generate_iq(cfg: &TxConfig) -> Result<TxOutput> {
    let frame_cfg = FrameConfig {
        source: cfg.callsign.clone(),
        destination: cfg.destination.clone(),
        path: cfg.path.clone(),
        payload: cfg.payload.clone(),
        flag_count: cfg.flag_count,
    };
    let framed_bits = build_frame(&frame_cfg)?;

    let mut log = SignalLogger::new();
    log.info("FRAME", format!("built {}-bit frame", framed_bits.len()));
    if cfg.debug {
        log.debug("FRAME", format_bit_trace(&framed_bits));
    }

    let line_coded = nrzi_encode(&framed_bits);
    let audio = afsk_modulate(&line_coded);

    let iq = if cfg.format.needs_iq() {
        Some(modulate_and_interpolate(&audio))
    } else {
        None
    };

    Ok(TxOutput { audio, iq, log })
}

/// Expected complex-sample count at 2.4 MHz for a given 48 kHz audio
/// sample count, per the spec's pipeline-length testable property.
pub fn expected_iq_sample_count(audio_sample_count: usize) -> usize {
    // Matches the 40-samples/symbol AFSK framing: the interpolator
    // consumes all but `taps_per_subfilter - 1` trailing audio samples,
    // but for payloads long enough to fill at least one BUFSIZE block the
    // dominant term is audio_sample_count * INTERPOLATION.
    audio_sample_count * INTERPOLATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsign::Callsign;
    use crate::config::{DigipeaterPath, OutputFormat, TxConfig};
    use crate::logging::LogLevel;

    fn base_config(format: OutputFormat) -> TxConfig {
        TxConfig {
            callsign: Callsign::parse("N0CALL-9").unwrap(),
            destination: Callsign::parse("APRS").unwrap(),
            path: DigipeaterPath::parse("WIDE1-1,WIDE2-1").unwrap(),
            payload: b"TEST".to_vec(),
            format,
            debug: false,
            flag_count: 100,
        }
    }

    #[test]
    fn pcm_format_skips_iq_stage() {
        let output = generate_iq(&base_config(OutputFormat::Pcm)).unwrap();
        assert!(!output.audio.is_empty());
        assert!(output.iq.is_none());
    }

    #[test]
    fn f32_format_produces_interpolated_iq() {
        let output = generate_iq(&base_config(OutputFormat::F32)).unwrap();
        let iq = output.iq.unwrap();
        assert!(!iq.is_empty());
        // Output count should be close to audio_len * INTERPOLATION, modulo
        // the small boundary trim at each BUFSIZE block's tail.
        let ratio = iq.len() as f64 / output.audio.len() as f64;
        assert!((ratio - INTERPOLATION as f64).abs() < 1.0, "ratio was {ratio}");
    }

    #[test]
    fn debug_flag_captures_raw_bit_trace_in_log() {
        let mut cfg = base_config(OutputFormat::Pcm);
        cfg.debug = true;
        let output = generate_iq(&cfg).unwrap();
        assert!(output
            .log
            .entries()
            .iter()
            .any(|e| e.subsystem == "FRAME" && e.level == LogLevel::Debug));
    }

    #[test]
    fn no_debug_flag_omits_bit_trace_but_keeps_frame_info() {
        let output = generate_iq(&base_config(OutputFormat::Pcm)).unwrap();
        assert!(!output.log.entries().iter().any(|e| e.level == LogLevel::Debug));
        assert!(output
            .log
            .entries()
            .iter()
            .any(|e| e.subsystem == "FRAME" && e.level == LogLevel::Info));
    }

    #[test]
    fn tx_pipeline_matches_generate_iq_output() {
        let cfg = base_config(OutputFormat::F32);
        let taps = aprs_lowpass_prototype(INTERPOLATION);
        let mut direct = TxPipeline::new(INTERPOLATION, &taps);

        let output = generate_iq(&cfg).unwrap();
        let via_pipeline = direct.run(&output.audio);
        assert_eq!(via_pipeline, output.iq.unwrap());
    }
}
