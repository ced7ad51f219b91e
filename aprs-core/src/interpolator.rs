//! Polyphase FIR interpolation: upsamples a complex baseband stream by an
//! integer factor using a prototype low-pass filter split into per-phase
//! sub-filters, so the filter runs at the input rate rather than the
//! zero-stuffed output rate.
//!
//! See <https://dspguru.com/dsp/faqs/multirate/interpolation/>.

use crate::ringbuffer::RingBuffer;
use num_complex::Complex32;

/// A polyphase FIR interpolator built from a prototype low-pass filter.
#[derive(Debug, Clone)]
pub struct PolyphaseFirInterpolator {
    interpolation: usize,
    /// Flat row-major `interpolation * taps_per_subfilter` tap matrix.
    xtaps: Vec<f32>,
    taps_per_subfilter: usize,
}

impl PolyphaseFirInterpolator {
    /// Pad `prototype_taps` on the right with zeros to a multiple of
    /// `interpolation`, then distribute by decimation: sub-filter `j` at
    /// position `k` holds `h[j + k * interpolation]`.
    pub fn new(interpolation: usize, prototype_taps: &[f32]) -> Self {
        assert!(interpolation > 0, "interpolation factor must be positive");

        let remainder = prototype_taps.len() % interpolation;
        let pad = if remainder == 0 {
            0
        } else {
            interpolation - remainder
        };
        let mut padded = prototype_taps.to_vec();
        padded.resize(padded.len() + pad, 0.0);

        let taps_per_subfilter = padded.len() / interpolation;
        let mut xtaps = vec![0.0f32; interpolation * taps_per_subfilter];
        for (i, &tap) in padded.iter().enumerate() {
            let j = i % interpolation;
            let k = i / interpolation;
            xtaps[j * taps_per_subfilter + k] = tap;
        }

        Self {
            interpolation,
            xtaps,
            taps_per_subfilter,
        }
    }

    fn subfilter(&self, j: usize) -> &[f32] {
        &self.xtaps[j * self.taps_per_subfilter..(j + 1) * self.taps_per_subfilter]
    }

    /// For each readable input position `i` in `0..=R - M` (`M` = taps per
    /// sub-filter), produce `interpolation` output samples (one per
    /// sub-filter, `i` outermost, `j` inner). Returns the number of input
    /// positions consumed; the caller removes exactly that many samples
    /// from the head of `input`.
    pub fn interpolate(&self, input: &RingBuffer, output: &mut Vec<Complex32>) -> usize {
        let r = input.read_available();
        let m = self.taps_per_subfilter;
        if r < m {
            return 0;
        }
        let processed = r - m + 1;
        output.reserve(processed * self.interpolation);

        for i in 0..processed {
            for j in 0..self.interpolation {
                let taps = self.subfilter(j);
                let mut sum = Complex32::new(0.0, 0.0);
                for k in 0..m {
                    sum += input.get(i + k) * taps[m - 1 - k];
                }
                output.push(sum);
            }
        }
        processed
    }
}

/// Reference implementation for parity testing: zero-stuff `input` by
/// `interpolation`, then convolve with the zero-padded prototype taps.
#[cfg(test)]
pub fn naive_interpolate(
    input: &[Complex32],
    interpolation: usize,
    prototype_taps: &[f32],
) -> Vec<Complex32> {
    let remainder = prototype_taps.len() % interpolation;
    let pad = if remainder == 0 {
        0
    } else {
        interpolation - remainder
    };
    let mut taps = prototype_taps.to_vec();
    taps.resize(taps.len() + pad, 0.0);

    let mut upsampled = Vec::with_capacity(input.len() * interpolation);
    for &sample in input {
        upsampled.extend(std::iter::repeat(Complex32::new(0.0, 0.0)).take(interpolation - 1));
        upsampled.push(sample);
    }

    let taps_count = taps.len();
    let processed = upsampled.len().saturating_sub(taps_count - 1);
    let mut output = Vec::with_capacity(processed);
    for i in 0..processed {
        let mut sum = Complex32::new(0.0, 0.0);
        for j in 0..taps_count {
            sum += upsampled[i + j] * taps[taps_count - j - 1];
        }
        output.push(sum);
    }
    output
}
