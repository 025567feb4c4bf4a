//! Delay reasons and the per-instance delay chain.

use std::collections::BTreeMap;

use tg_core::Sampler;

// ── DelayReasons ──────────────────────────────────────────────────────────────

/// Weighted pool of delay reasons.
///
/// Built from a `BTreeMap`, so the cumulative table is in name order and
/// independent of how the map was assembled.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayReasons {
    names: Vec<String>,
    cumulative: Vec<f64>,
}

impl DelayReasons {
    /// Reasons with non-positive weight are dropped.
    pub fn new(weights: &BTreeMap<String, f64>) -> Self {
        let mut names = Vec::with_capacity(weights.len());
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0;
        for (name, &w) in weights {
            if w > 0.0 {
                total += w;
                names.push(name.clone());
                cumulative.push(total);
            }
        }
        Self { names, cumulative }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Draw a reason.  `None` (and no draw) for an empty pool.
    pub fn pick(&self, sampler: &mut Sampler) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        let u = sampler.next_uniform() * self.total_weight();
        let i = self
            .cumulative
            .iter()
            .position(|&c| u < c)
            .unwrap_or(self.names.len() - 1);
        Some(&self.names[i])
    }
}

// ── DelayChain ────────────────────────────────────────────────────────────────

/// Delay carried by one vehicle from trip to trip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayChain {
    pub delay_ms: i64,
    pub reason: Option<String>,
}

impl DelayChain {
    /// Recover `duration_ms · fraction` of the carried delay.  A delay that
    /// reaches zero drops its reason.
    pub fn absorb(&mut self, duration_ms: f64, fraction: f64) {
        let slack = (duration_ms * fraction).max(0.0) as i64;
        self.delay_ms = (self.delay_ms - slack).max(0);
        if self.delay_ms == 0 {
            self.reason = None;
        }
    }

    /// With probability `chance`, add a fresh delay of
    /// `biased_index(max_ms, power)` ms, giving it a reason if the chain has
    /// none.  The chance draw is always consumed.
    pub fn maybe_delay(
        &mut self,
        sampler: &mut Sampler,
        chance: f64,
        max_ms: u64,
        power: f64,
        reasons: &DelayReasons,
    ) {
        if !sampler.chance(chance) {
            return;
        }
        let added = sampler.biased_index(max_ms as usize, power) as i64;
        self.delay_ms += added;
        if self.delay_ms > 0 && self.reason.is_none() {
            self.reason = reasons.pick(sampler).map(str::to_string);
        }
    }
}
