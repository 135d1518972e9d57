//! Seeded value generation for decorative charts
//!
//! Everything here is a pure function of its inputs. The generator is a
//! trigonometric hash, not a statistical RNG: it only has to look random on
//! screen, and the same seed must always draw the same chart.

/// Deterministic pseudo-random value in `[0, 1)` for a seed.
///
/// Any finite seed is valid. Non-finite seeds propagate as NaN.
pub fn rng(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    let frac = x - x.floor();
    // x - floor(x) rounds up to 1.0 for vanishingly small negative x
    if frac >= 1.0 { 0.0 } else { frac }
}

/// Bounded random walk of exactly `n` values.
///
/// Starts at `amp / 2`, steps by `(rng(seed + i) - 0.5) * amp * 0.25` and
/// clamps every value into `[amp * 0.1, amp * 0.9]`.
pub fn series(n: usize, amp: f64, seed: f64) -> Vec<f64> {
    let low = amp * 0.1;
    let high = amp * 0.9;

    let mut out = Vec::with_capacity(n);
    let mut value = amp / 2.0;
    for i in 0..n {
        value += (rng(seed + i as f64) - 0.5) * amp * 0.25;
        value = value.min(high).max(low);
        out.push(value);
    }
    out
}

/// Length and amplitude of a generated series
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesShape {
    /// Number of points
    pub length: usize,
    /// Amplitude; values stay within 10%..90% of it
    pub amplitude: f64,
}

impl SeriesShape {
    pub const fn new(length: usize, amplitude: f64) -> Self {
        Self { length, amplitude }
    }

    /// Build the series for a seed
    pub fn build(&self, seed: f64) -> Vec<f64> {
        series(self.length, self.amplitude, seed)
    }
}
