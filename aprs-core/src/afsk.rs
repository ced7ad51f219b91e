//! AFSK (Audio Frequency-Shift Keying) modulation of an NRZI bit stream
//! into a 48 kHz mono audio waveform.

use std::f32::consts::PI;

pub const SAMPLE_RATE: usize = 48_000;
pub const BAUD: usize = 1200;
pub const MARK_HZ: f32 = 1200.0;
pub const SPACE_HZ: f32 = 2200.0;
pub const SAMPLES_PER_SYMBOL: usize = SAMPLE_RATE / BAUD;
pub const GAIN: f32 = 0.5;

const SILENCE_SAMPLES: usize = SAMPLE_RATE / 2;

/// Render an NRZI bit stream as a 48 kHz audio waveform: 0.5 s of leading
/// silence, one 1200 Hz (mark, bit=1) or 2200 Hz (space, bit=0) tone per
/// bit at 40 samples/symbol with phase continuous across bit boundaries,
/// then 0.5 s of trailing silence.
pub fn afsk_modulate(nrzi_bits: &[bool]) -> Vec<f32> {
    let mut wave = Vec::with_capacity(SILENCE_SAMPLES * 2 + nrzi_bits.len() * SAMPLES_PER_SYMBOL);
    wave.extend(std::iter::repeat(0.0f32).take(SILENCE_SAMPLES));

    let mut phase = 0.0f32;
    for &bit in nrzi_bits {
        let freq = if bit { MARK_HZ } else { SPACE_HZ };
        let dphi = 2.0 * PI * freq / SAMPLE_RATE as f32;
        for _ in 0..SAMPLES_PER_SYMBOL {
            wave.push(phase.sin() * GAIN);
            phase += dphi;
            if phase > 2.0 * PI {
                phase -= 2.0 * PI;
            }
        }
    }

    wave.extend(std::iter::repeat(0.0f32).take(SILENCE_SAMPLES));
    wave
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::{num_complex::Complex, FftPlanner};

    #[test]
    fn emits_silence_padding() {
        let wave = afsk_modulate(&[true]);
        assert_eq!(wave.len(), SILENCE_SAMPLES * 2 + SAMPLES_PER_SYMBOL);
        assert!(wave[..SILENCE_SAMPLES].iter().all(|&s| s == 0.0));
        assert!(wave[wave.len() - SILENCE_SAMPLES..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn one_bit_emits_forty_samples() {
        let wave = afsk_modulate(&[true]);
        let tone = &wave[SILENCE_SAMPLES..SILENCE_SAMPLES + SAMPLES_PER_SYMBOL];
        assert_eq!(tone.len(), 40);
    }

    #[test]
    fn phase_continuity_bounds_sample_to_sample_delta() {
        let bits: Vec<bool> = (0..20).map(|i| i % 2 == 0).collect();
        let wave = afsk_modulate(&bits);
        let dphi_max = 2.0 * PI * SPACE_HZ / SAMPLE_RATE as f32;
        let eps = 1e-3;
        for w in wave.windows(2) {
            assert!((w[1] - w[0]).abs() <= dphi_max * GAIN + eps);
        }
    }

    #[test]
    fn mark_tone_fft_peak_is_near_1200hz() {
        let wave = afsk_modulate(&[true]);
        let tone = &wave[SILENCE_SAMPLES..SILENCE_SAMPLES + SAMPLES_PER_SYMBOL];

        // Zero-pad to a larger power-of-two FFT for resolvable bin spacing.
        let fft_len = 4096;
        let mut buf: Vec<Complex<f32>> = tone.iter().map(|&s| Complex::new(s, 0.0)).collect();
        buf.resize(fft_len, Complex::new(0.0, 0.0));

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);
        fft.process(&mut buf);

        let (peak_bin, _) = buf[..fft_len / 2]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().partial_cmp(&b.1.norm()).unwrap())
            .unwrap();
        let peak_hz = peak_bin as f32 * SAMPLE_RATE as f32 / fft_len as f32;
        assert!((peak_hz - MARK_HZ).abs() <= 30.0, "peak at {peak_hz} Hz");
    }
}
