//! Display heuristics derived from a finished negotiation.
//!
//! These are presentation scores only. Each is a deterministic function of the
//! round count, the final price and the submitted bounds.

use shared::domain::{NegotiationResult, PriceBounds};

pub const EFFICIENCY_FALLBACK: u32 = 85;
pub const FAIRNESS_FALLBACK: f64 = 7.0;
pub const COMPLEXITY_FALLBACK: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Percentage, 60..=100.
    pub efficiency: u32,
    /// Out of 10, one decimal, 5.0..=10.0.
    pub fairness: f64,
    /// Out of 10, 3..=10.
    pub complexity: u32,
}

impl DerivedMetrics {
    pub fn compute(result: &NegotiationResult, bounds: PriceBounds) -> Self {
        let rounds = result.round_count();
        Self {
            efficiency: efficiency(rounds),
            fairness: fairness(result.final_price, bounds),
            complexity: complexity(rounds),
        }
    }
}

pub fn efficiency(rounds: Option<usize>) -> u32 {
    let Some(rounds) = rounds else {
        return EFFICIENCY_FALLBACK;
    };
    100usize.saturating_sub(rounds.saturating_mul(5)).clamp(60, 100) as u32
}

pub fn fairness(final_price: Option<f64>, bounds: PriceBounds) -> f64 {
    let Some(final_price) = final_price else {
        return FAIRNESS_FALLBACK;
    };
    let deviation = (final_price - bounds.midpoint()).abs();
    let range = bounds.range();
    let raw = if range > 0.0 {
        10.0 - (deviation / range) * 5.0
    } else if deviation == 0.0 {
        10.0
    } else {
        5.0
    };
    (raw.clamp(5.0, 10.0) * 10.0).round() / 10.0
}

pub fn complexity(rounds: Option<usize>) -> u32 {
    let Some(rounds) = rounds else {
        return COMPLEXITY_FALLBACK;
    };
    (rounds / 2).saturating_add(3).clamp(3, 10) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAPTOP: PriceBounds = PriceBounds {
        buyer_max: 1000.0,
        seller_min: 800.0,
    };

    #[test]
    fn efficiency_penalizes_rounds_and_clamps() {
        assert_eq!(efficiency(Some(0)), 100);
        assert_eq!(efficiency(Some(1)), 95);
        assert_eq!(efficiency(Some(3)), 85);
        assert_eq!(efficiency(Some(8)), 60);
        assert_eq!(efficiency(Some(20)), 60);
        assert_eq!(efficiency(None), 85);
    }

    #[test]
    fn fairness_is_perfect_at_midpoint() {
        assert_eq!(fairness(Some(900.0), LAPTOP), 10.0);
    }

    #[test]
    fn fairness_drops_with_deviation_and_clamps() {
        // deviation 50 over range 200 -> 10 - 1.25 = 8.75 -> 8.8
        assert_eq!(fairness(Some(950.0), LAPTOP), 8.8);
        assert_eq!(fairness(Some(800.0), LAPTOP), 7.5);
        assert_eq!(fairness(Some(5000.0), LAPTOP), 5.0);
        assert_eq!(fairness(None, LAPTOP), 7.0);
    }

    #[test]
    fn fairness_with_zero_range() {
        let flat = PriceBounds {
            buyer_max: 500.0,
            seller_min: 500.0,
        };
        assert_eq!(fairness(Some(500.0), flat), 10.0);
        assert_eq!(fairness(Some(510.0), flat), 5.0);
    }

    #[test]
    fn complexity_grows_every_two_rounds_and_clamps() {
        assert_eq!(complexity(Some(0)), 3);
        assert_eq!(complexity(Some(1)), 3);
        assert_eq!(complexity(Some(6)), 6);
        assert_eq!(complexity(Some(40)), 10);
        assert_eq!(complexity(None), 6);
    }
}
