//! Closed-form hit probabilities
//!
//! Everything here is exact arithmetic on the primary die; no dice are rolled.

use crate::combat::net_advantage;
use crate::error::{RulesError, RulesResult};
use crate::types::ArmorTier;
use serde::{Deserialize, Serialize};

/// Highest critical-chain order reported by [`ProbabilitySummary`]
pub const MAX_CRIT_ORDER: u32 = 5;

/// Miss and critical chances for one die size and advantage state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySummary {
    pub die_sides: u32,
    /// Advantage after armor adjustment
    pub net_advantage: i32,
    /// Chance the kept primary die shows 1
    pub miss_chance: f64,
    /// Chance the kept primary die shows the max face
    pub crit_chance: f64,
    /// Chance of a critical followed by 1..=4 consecutive explosions (orders 2..=5)
    pub chained_crit_chances: [f64; 4],
}

impl ProbabilitySummary {
    pub fn hit_chance(&self) -> f64 {
        1.0 - self.miss_chance
    }

    /// Chance of a critical chain of the given order (1 is a plain critical)
    pub fn crit_chance_of_order(&self, order: u32) -> Option<f64> {
        match order {
            1 => Some(self.crit_chance),
            2..=MAX_CRIT_ORDER => Some(self.chained_crit_chances[(order - 2) as usize]),
            _ => None,
        }
    }
}

/// Compute miss and critical chances for the primary die
///
/// Reinforced armor shifts `advantage` down by one before anything else. With
/// `n = |adv| + 1` dice and `Y` sides:
/// - no advantage: miss = crit = 1/Y
/// - advantage (keep max): miss = (1/Y)^n, crit = 1 - ((Y-1)/Y)^n
/// - disadvantage (keep min): miss = 1 - ((Y-1)/Y)^n, crit = (1/Y)^n
pub fn compute_probability_summary(
    die_sides: u32,
    advantage: i32,
    armor: ArmorTier,
) -> RulesResult<ProbabilitySummary> {
    if die_sides < 2 {
        return Err(RulesError::invalid(format!(
            "dice need at least two sides, got d{die_sides}"
        )));
    }

    let sides = f64::from(die_sides);
    let single = 1.0 / sides;
    let not_single = (sides - 1.0) / sides;
    let adv = net_advantage(advantage, armor);
    let n = f64::from(adv.unsigned_abs()) + 1.0;

    let (miss_chance, crit_chance) = if adv > 0 {
        (single.powf(n), 1.0 - not_single.powf(n))
    } else if adv < 0 {
        (1.0 - not_single.powf(n), single.powf(n))
    } else {
        (single, single)
    };

    let mut chained_crit_chances = [0.0; 4];
    let mut chance = crit_chance;
    for slot in chained_crit_chances.iter_mut() {
        chance *= single;
        *slot = chance;
    }

    Ok(ProbabilitySummary {
        die_sides,
        net_advantage: adv,
        miss_chance,
        crit_chance,
        chained_crit_chances,
    })
}

/// Naive average of `XdY` ignoring misses, criticals and armor: `X * (Y + 1) / 2`
pub fn flat_average_damage(dice_count: u32, die_sides: u32) -> f64 {
    f64::from(dice_count) * (f64::from(die_sides) + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_no_advantage_is_exact() {
        for sides in [2, 4, 6, 8, 10, 12, 20] {
            let summary = compute_probability_summary(sides, 0, ArmorTier::None).unwrap();
            assert_eq!(summary.miss_chance, 1.0 / f64::from(sides));
            assert_eq!(summary.crit_chance, 1.0 / f64::from(sides));
        }
    }

    #[test]
    fn test_advantage() {
        let summary = compute_probability_summary(6, 1, ArmorTier::None).unwrap();
        assert!((summary.miss_chance - 1.0 / 36.0).abs() < EPS);
        assert!((summary.crit_chance - 11.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn test_disadvantage() {
        let summary = compute_probability_summary(6, -1, ArmorTier::None).unwrap();
        assert!((summary.miss_chance - 11.0 / 36.0).abs() < EPS);
        assert!((summary.crit_chance - 1.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn test_reinforced_shifts_advantage() {
        let armored = compute_probability_summary(8, 0, ArmorTier::Reinforced).unwrap();
        let disadvantage = compute_probability_summary(8, -1, ArmorTier::None).unwrap();
        assert_eq!(armored.net_advantage, -1);
        assert_eq!(armored, disadvantage);

        let cancelled = compute_probability_summary(8, 1, ArmorTier::Reinforced).unwrap();
        assert_eq!(cancelled.miss_chance, 1.0 / 8.0);
    }

    #[test]
    fn test_other_armor_does_not_shift() {
        let heavy = compute_probability_summary(10, 2, ArmorTier::Heavy).unwrap();
        assert_eq!(heavy.net_advantage, 2);
    }

    #[test]
    fn test_chained_orders() {
        let summary = compute_probability_summary(4, 0, ArmorTier::None).unwrap();
        assert_eq!(summary.crit_chance_of_order(1), Some(0.25));
        assert!((summary.crit_chance_of_order(2).unwrap() - 1.0 / 16.0).abs() < EPS);
        assert!((summary.crit_chance_of_order(5).unwrap() - 1.0 / 1024.0).abs() < EPS);
        assert_eq!(summary.crit_chance_of_order(0), None);
        assert_eq!(summary.crit_chance_of_order(6), None);
    }

    #[test]
    fn test_invalid_die() {
        assert!(compute_probability_summary(1, 0, ArmorTier::None).is_err());
        assert!(compute_probability_summary(0, 0, ArmorTier::None).is_err());
    }

    #[test]
    fn test_flat_average() {
        assert!((flat_average_damage(1, 6) - 3.5).abs() < EPS);
        assert!((flat_average_damage(3, 8) - 13.5).abs() < EPS);
        assert_eq!(flat_average_damage(0, 6), 0.0);
    }
}
