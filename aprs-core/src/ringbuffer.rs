//! A bounded contiguous ring buffer for complex samples.
//!
//! Spec rationale (see `SPEC_FULL.md`): the original C++ used a lock-free
//! SPSC ring buffer to share data between the FM-modulator "producer" and
//! the polyphase interpolator "consumer" running in separate translation
//! units. This pipeline is single-threaded and strictly alternates
//! write/interpolate/remove on one thread, so a plain growable buffer with
//! a consume-prefix operation is sufficient and easier to reason about.

use num_complex::Complex32;
use std::collections::VecDeque;

/// Bounded FIFO of complex samples, backed by a `VecDeque`.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: VecDeque<Complex32>,
    capacity: usize,
}

impl RingBuffer {
    /// Construct a ring buffer whose capacity is rounded up to the next
    /// power of two (matching the spec's "power-of-two capacity" data
    /// model entry).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two();
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn read_available(&self) -> usize {
        self.data.len()
    }

    pub fn write_available(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Push a single sample. Panics if the buffer is full; callers are
    /// responsible for checking `write_available` first, per the spec's
    /// contract for the FM modulator's writer.
    pub fn push(&mut self, sample: Complex32) {
        assert!(
            self.data.len() < self.capacity,
            "ring buffer overflow: capacity {} exceeded",
            self.capacity
        );
        self.data.push_back(sample);
    }

    pub fn push_slice(&mut self, samples: &[Complex32]) {
        for &s in samples {
            self.push(s);
        }
    }

    /// Indexed read relative to the current head (`i < read_available()`).
    pub fn get(&self, i: usize) -> Complex32 {
        self.data[i]
    }

    /// Drop the first `n` samples from the head of the buffer.
    pub fn remove(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data.drain(..n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_to_power_of_two() {
        let rb = RingBuffer::with_capacity(100);
        assert_eq!(rb.capacity(), 128);
    }

    #[test]
    fn push_and_remove_track_availability() {
        let mut rb = RingBuffer::with_capacity(8);
        assert_eq!(rb.write_available(), 8);
        rb.push_slice(&[Complex32::new(1.0, 0.0); 3]);
        assert_eq!(rb.read_available(), 3);
        assert_eq!(rb.write_available(), 5);
        rb.remove(2);
        assert_eq!(rb.read_available(), 1);
        assert_eq!(rb.get(0), Complex32::new(1.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn push_beyond_capacity_panics() {
        let mut rb = RingBuffer::with_capacity(2);
        rb.push_slice(&[Complex32::new(0.0, 0.0); 3]);
    }
}
