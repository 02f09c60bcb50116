//! Alternate roll mechanics kept for comparison with the main attack rules

use super::engine::{roll_die, roll_explode, roll_n};
use super::RandomSource;
use crate::error::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};

/// Result of a Nimble-style damage roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimbleRoll {
    /// Damage dealt (0 on a miss)
    pub total: u64,
    pub is_miss: bool,
    pub is_critical: bool,
}

/// Nimble damage: `count`dY where the first die decides miss or crit
///
/// A first die of 1 misses outright. A first die showing the max face crits
/// and adds one exploding die (two when vicious, still exploding on the first
/// die only).
pub fn roll_nimble(
    count: u32,
    sides: u32,
    vicious: bool,
    rng: &mut impl RandomSource,
) -> RulesResult<NimbleRoll> {
    if count == 0 {
        return Err(RulesError::invalid("a nimble roll needs at least one die"));
    }
    if sides < 2 {
        return Err(RulesError::invalid(format!(
            "a nimble roll needs at least two sides, got {sides}"
        )));
    }

    let rolls = roll_n(count, sides, rng)?;
    let first = rolls[0];
    if first == 1 {
        return Ok(NimbleRoll {
            total: 0,
            is_miss: true,
            is_critical: false,
        });
    }

    let mut total: u64 = rolls.iter().map(|&r| u64::from(r)).sum();
    let is_critical = first == sides;
    if is_critical {
        let extra_dice = if vicious { 2 } else { 1 };
        total += roll_explode(extra_dice, sides, sides, rng)?;
    }

    Ok(NimbleRoll {
        total,
        is_miss: false,
        is_critical,
    })
}

/// Witcher-style d10: a 10 adds an exploding d10, a 1 subtracts one
pub fn roll_witcher_d10(base: i64, rng: &mut impl RandomSource) -> RulesResult<i64> {
    let roll = roll_die(10, rng);
    let mut total = base + i64::from(roll);
    match roll {
        10 => total += roll_explode(1, 10, 10, rng)? as i64,
        1 => total -= roll_explode(1, 10, 10, rng)? as i64,
        _ => {}
    }
    Ok(total)
}
