//! Kaiser-windowed low-pass FIR filter design.
//!
//! Internally computed in double precision and cast to `f32` on return,
//! per the spec's numerical-precision note.

use std::f64::consts::PI;

const KAISER_BETA: f64 = 7.0;
const IZERO_EPSILON: f64 = 1e-21;

/// Modified Bessel function of the first kind, order zero, evaluated by
/// series summation until the update term falls below `IZERO_EPSILON`
/// times the running sum.
fn izero(x: f64) -> f64 {
    let mut sum = 1.0;
    let mut u = 1.0;
    let mut n = 1.0;
    let half_x = x / 2.0;
    loop {
        let mut term = half_x / n;
        n += 1.0;
        term *= term;
        u *= term;
        sum += u;
        if u < IZERO_EPSILON * sum {
            break;
        }
    }
    sum
}

/// Kaiser window of length `n` with shape parameter `beta`.
fn kaiser_window(n: usize, beta: f64) -> Vec<f64> {
    let i_beta = 1.0 / izero(beta);
    let mut w = vec![0.0; n];
    w[0] = i_beta;
    w[n - 1] = i_beta;
    for i in 1..n - 1 {
        let t = 2.0 * i as f64 / (n - 1) as f64 - 1.0;
        w[i] = izero(beta * (1.0 - t * t).sqrt()) * i_beta;
    }
    w
}

fn compute_ntaps(sampling_freq: f64, transition_width: f64, beta: f64) -> usize {
    let a = beta / 0.1102 + 8.7;
    let mut ntaps = (a * sampling_freq / (22.0 * transition_width)).ceil() as usize;
    if ntaps % 2 == 0 {
        ntaps += 1;
    }
    ntaps
}

/// Design a Kaiser-windowed low-pass FIR prototype.
///
/// `gain`, `sampling_freq`, `cutoff_freq` and `transition_width` are all in
/// Hz except `gain`, which is dimensionless (the desired DC gain).
pub fn design_lowpass(gain: f64, sampling_freq: f64, cutoff_freq: f64, transition_width: f64) -> Vec<f32> {
    let ntaps = compute_ntaps(sampling_freq, transition_width, KAISER_BETA);
    let window = kaiser_window(ntaps, KAISER_BETA);
    let m = (ntaps - 1) / 2;
    let omega0 = 2.0 * PI * cutoff_freq / sampling_freq;

    let mut taps = vec![0.0f64; ntaps];
    for n in -(m as isize)..=(m as isize) {
        let idx = (n + m as isize) as usize;
        taps[idx] = if n == 0 {
            omega0 / PI * window[idx]
        } else {
            let n = n as f64;
            (n * omega0).sin() / (n * PI) * window[idx]
        };
    }

    let mut fmax = taps[m];
    for n in 1..=m {
        fmax += 2.0 * taps[n + m];
    }
    let scale = gain / fmax;
    taps.iter().map(|&t| (t * scale) as f32).collect()
}
