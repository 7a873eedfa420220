//! Headline market indices shown next to the feed.
//!
//! Values drift by a small random walk once per refresh cycle. Nothing here
//! feeds back into dedup or merging.

use rand::Rng;
use serde::Serialize;

/// Centre of the random walk. Slightly under one half so moves lean upward.
const WALK_BIAS: f64 = 0.48;
/// Maximum absolute move per step, as a fraction of the current value.
const WALK_SCALE: f64 = 0.002;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketIndex {
    pub label: String,
    pub value: f64,
    /// Percentage change of the most recent move.
    pub change_pct: f64,
}

impl MarketIndex {
    pub fn new(label: impl Into<String>, value: f64, change_pct: f64) -> Self {
        Self {
            label: label.into(),
            value,
            change_pct,
        }
    }

    /// Signed change with two decimals, e.g. `+0.34%`.
    pub fn change_label(&self) -> String {
        let sign = if self.change_pct >= 0.0 { "+" } else { "" };
        format!("{sign}{:.2}%", self.change_pct)
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let delta = (rng.r#gen::<f64>() - WALK_BIAS) * self.value * WALK_SCALE;
        if self.value != 0.0 {
            self.change_pct = delta / self.value * 100.0;
        }
        self.value += delta;
    }
}

/// The set of indices displayed together.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketBoard {
    indices: Vec<MarketIndex>,
}

impl Default for MarketBoard {
    fn default() -> Self {
        Self::new(vec![
            MarketIndex::new("NIFTY 50", 24_180.10, 0.34),
            MarketIndex::new("SENSEX", 79_342.15, 0.28),
            MarketIndex::new("BANKNIFTY", 51_840.25, 0.52),
            MarketIndex::new("INDIA VIX", 13.42, -2.10),
            MarketIndex::new("USD/INR", 83.94, 0.12),
        ])
    }
}

impl MarketBoard {
    pub fn new(indices: Vec<MarketIndex>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[MarketIndex] {
        &self.indices
    }

    /// Moves every index one random-walk step.
    pub fn random_walk<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for index in &mut self.indices {
            index.step(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn walk_stays_within_step_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = MarketBoard::default();

        for _ in 0..500 {
            let before: Vec<f64> = board.indices().iter().map(|i| i.value).collect();
            board.random_walk(&mut rng);
            for (index, prev) in board.indices().iter().zip(before) {
                let rel = (index.value - prev).abs() / prev;
                // (1 - 0.48) * 0.002 is the largest possible move.
                assert!(rel <= 0.00104 + 1e-12, "{} moved {rel}", index.label);
                assert!((index.change_pct / 100.0 - (index.value - prev) / prev).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn change_label_is_signed() {
        assert_eq!(MarketIndex::new("A", 1.0, 0.344).change_label(), "+0.34%");
        assert_eq!(MarketIndex::new("B", 1.0, -2.1).change_label(), "-2.10%");
        assert_eq!(MarketIndex::new("C", 1.0, 0.0).change_label(), "+0.00%");
    }
}
