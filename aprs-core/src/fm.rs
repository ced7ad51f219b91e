//! FM modulation: integrates an audio waveform into a phase-continuous
//! complex baseband signal.

use crate::afsk::SAMPLE_RATE;
use crate::ringbuffer::RingBuffer;
use num_complex::Complex32;
use std::f32::consts::PI;

/// Peak frequency deviation in Hz for the FM carrier.
pub const MAX_DEVIATION_HZ: f32 = 5000.0;

/// `sensitivity = 2π · max_deviation / sample_rate`.
pub fn sensitivity() -> f32 {
    2.0 * PI * MAX_DEVIATION_HZ / SAMPLE_RATE as f32
}

/// Carries the running phase of the FM modulator across invocations.
#[derive(Debug, Clone, Copy)]
pub struct FmModulator {
    phase: f32,
    sensitivity: f32,
}

impl FmModulator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            sensitivity: sensitivity(),
        }
    }

    /// FM-modulate `input` into `ring`, writing exactly `input.len()`
    /// complex samples. The caller must ensure `ring.write_available() >=
    /// input.len()`.
    pub fn modulate_into(&mut self, input: &[f32], ring: &mut RingBuffer) {
        assert!(
            input.len() <= ring.write_available(),
            "ring buffer has insufficient space for {} input samples",
            input.len()
        );
        for &x in input {
            self.phase += x * self.sensitivity;
            while self.phase > PI {
                self.phase -= 2.0 * PI;
            }
            while self.phase <= -PI {
                self.phase += 2.0 * PI;
            }
            ring.push(Complex32::new(self.phase.cos(), self.phase.sin()));
        }
    }
}

impl Default for FmModulator {
    fn default() -> Self {
        Self::new()
    }
}
