//! NRZI (Non-Return-to-Zero Inverted) line coding.
//!
//! Input 0 toggles the line state; input 1 holds it. The initial line
//! state is logical 1. This is the stage that turns the zero-bit preamble
//! and flag-octet repeats into a cleanly alternating tone pattern for
//! receiver PLL lock.

/// Encode a logical bit sequence into its NRZI line-coded equivalent.
/// Output has the same length as `bits`.
pub fn nrzi_encode(bits: &[bool]) -> Vec<bool> {
    let mut state = true;
    let mut out = Vec::with_capacity(bits.len());
    for &bit in bits {
        if !bit {
            state = !state;
        }
        out.push(state);
    }
    out
}

/// Invert `nrzi_encode`: toggle-detect the line state back to the original
/// logical bits. Not used by the transmit-only pipeline; kept to express
/// the NRZI involution property test.
#[cfg(test)]
fn nrzi_decode(line: &[bool]) -> Vec<bool> {
    let mut state = true;
    let mut out = Vec::with_capacity(line.len());
    for &level in line {
        out.push(level == state);
        state = level;
    }
    out
}
