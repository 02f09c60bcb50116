//! Primitive dice operations

use super::constants::MAX_EXPLOSION_CHAIN;
use super::RandomSource;
use crate::error::{RulesError, RulesResult};
use tracing::warn;

/// Roll a single die without validation (callers have already checked `sides`)
pub(crate) fn roll_die(sides: u32, rng: &mut impl RandomSource) -> u32 {
    rng.roll_range(1, sides)
}

fn check_sides(sides: u32) -> RulesResult<()> {
    if sides < 1 {
        return Err(RulesError::invalid(format!(
            "a die needs at least one side, got {sides}"
        )));
    }
    Ok(())
}

/// Roll `count` dice with `sides` faces each, in roll order
pub fn roll_n(count: u32, sides: u32, rng: &mut impl RandomSource) -> RulesResult<Vec<u32>> {
    check_sides(sides)?;
    Ok((0..count).map(|_| roll_die(sides, rng)).collect())
}

/// Roll `count` dice and discard the `drop_n` lowest (`XdYdlZ`)
///
/// The kept dice are returned sorted ascending.
pub fn roll_drop_lowest(
    count: u32,
    sides: u32,
    drop_n: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<Vec<u32>> {
    check_drop(count, drop_n)?;
    let mut rolls = roll_n(count, sides, rng)?;
    rolls.sort_unstable();
    rolls.drain(..drop_n as usize);
    Ok(rolls)
}

/// Roll `count` dice and discard the `drop_n` highest (`XdYdhZ`)
///
/// The kept dice are returned sorted descending.
pub fn roll_drop_highest(
    count: u32,
    sides: u32,
    drop_n: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<Vec<u32>> {
    check_drop(count, drop_n)?;
    let mut rolls = roll_n(count, sides, rng)?;
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls.drain(..drop_n as usize);
    Ok(rolls)
}

fn check_drop(count: u32, drop_n: u32) -> RulesResult<()> {
    if drop_n > count {
        return Err(RulesError::invalid(format!(
            "cannot drop {drop_n} dice from a roll of {count}"
        )));
    }
    Ok(())
}

/// Roll `count` dice and sum them, exploding on the first die (`XdYeZ`)
///
/// Whenever the first die of a batch lands on `threshold` or higher, a whole
/// new batch of `count` dice is rolled and added. Only the first die of each
/// batch is inspected; the others never trigger an explosion.
pub fn roll_explode(
    count: u32,
    sides: u32,
    threshold: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<u64> {
    check_sides(sides)?;
    if count == 0 {
        return Err(RulesError::invalid("an exploding roll needs at least one die"));
    }
    if threshold < 2 {
        return Err(RulesError::invalid(format!(
            "explosion threshold {threshold} would explode on every roll"
        )));
    }

    let mut total = 0u64;
    for _ in 0..MAX_EXPLOSION_CHAIN {
        let mut first = 0;
        for i in 0..count {
            let value = roll_die(sides, rng);
            if i == 0 {
                first = value;
            }
            total += u64::from(value);
        }
        if first < threshold {
            return Ok(total);
        }
    }

    warn!(count, sides, threshold, "explosion chain hit the safety cap");
    Ok(total)
}
