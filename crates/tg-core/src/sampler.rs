//! Deterministic scalar pseudo-random source.
//!
//! # Determinism strategy
//!
//! Every draw is a pure function of an integer counter:
//!
//!   u = frac(sin(counter) * 10000),  counter += 1
//!
//! There is no external entropy and no hidden global state.  Two samplers
//! created with the same seed produce identical sequences on every platform
//! whose `f64::sin` is correctly rounded, which is what makes whole-pipeline
//! runs byte-reproducible.
//!
//! One `Sampler` is threaded by `&mut` through every stage of one generation
//! run.  The type is deliberately not `Clone`: two copies of the same
//! counter would silently replay the same draws.  Independent runs (e.g. on
//! different threads) must each construct their own sampler.

use std::f64::consts::FRAC_PI_2;

/// Seeded scalar PRNG plus the biased-choice primitives built on top of it.
#[derive(Debug)]
pub struct Sampler {
    counter: u64,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self { counter: seed }
    }

    /// The counter value the next draw will use.
    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Next uniform draw, `frac(sin(counter) * 10000)`.
    ///
    /// The result lies in `[0, 1)` up to floating-point rounding of the
    /// fractional part; index helpers below clamp, so callers never see an
    /// out-of-range index.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        let x = (self.counter as f64).sin() * 10_000.0;
        self.counter = self.counter.wrapping_add(1);
        x - x.floor()
    }

    /// `true` with probability `p`.  Always consumes one draw.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_uniform() < p
    }

    /// Uniform index in `[0, n - 1]`.  Returns 0 for `n == 0`.
    #[inline]
    pub fn uniform_index(&mut self, n: usize) -> usize {
        let u = self.next_uniform();
        clamp_index((u * n as f64).floor(), n)
    }

    /// Uniform integer in `[lo, hi)` (`lo` when the range is empty).
    #[inline]
    pub fn uniform_range(&mut self, lo: i64, hi: i64) -> i64 {
        let u = self.next_uniform();
        if hi <= lo {
            return lo;
        }
        let span = i128::from(hi) - i128::from(lo);
        let offset = ((u * span as f64).floor() as i128).min(span - 1);
        (i128::from(lo) + offset) as i64
    }

    /// Index in `[0, n - 1]` with mass concentrated at low indices.
    ///
    /// ```text
    /// beta      = sin(u * π/2) ^ power
    /// beta_left = beta < 0.5 ? 2·beta : 2·(1 − beta)
    /// index     = floor(beta_left · n)
    /// ```
    ///
    /// Callers sort candidates descending by weight/length first, so a low
    /// index means a heavy station, a long edge or a small delay.
    pub fn biased_index(&mut self, n: usize, power: f64) -> usize {
        let u = self.next_uniform();
        let beta = (u * FRAC_PI_2).sin().powf(power);
        let beta_left = if beta < 0.5 { 2.0 * beta } else { 2.0 * (1.0 - beta) };
        clamp_index((beta_left * n as f64).floor(), n)
    }

    /// `items[biased_index(items.len(), power)]`, or `None` for an empty slice.
    ///
    /// A draw is consumed even for an empty slice so the sequence of later
    /// draws does not depend on whether a candidate list happened to be empty.
    pub fn biased_choice<'a, T>(&mut self, items: &'a [T], power: f64) -> Option<&'a T> {
        let i = self.biased_index(items.len(), power);
        items.get(i)
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let i = self.uniform_index(items.len());
        items.get(i)
    }
}

#[inline]
fn clamp_index(raw: f64, n: usize) -> usize {
    if n == 0 || raw.is_nan() || raw < 0.0 {
        return 0;
    }
    (raw as usize).min(n - 1)
}
