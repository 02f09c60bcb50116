//! Scenario sweep - average damage across a grid of dice counts and die sizes

use super::estimate::{estimate_average_damage, estimate_average_damage_with_rng};
use crate::combat::{AttackConfiguration, ScenarioProfile};
use crate::error::{RulesError, RulesResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Average damage for every `(dice_count, die_sides)` pair of a sweep
///
/// Rows are dice counts `1..=max_dice_count`; columns follow `die_sides` in
/// the order the sweep was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGrid {
    pub profile: ScenarioProfile,
    pub trials_per_cell: u32,
    pub max_dice_count: u32,
    pub die_sides: Vec<u32>,
    /// Row-major averages
    cells: Vec<f64>,
}

impl ScenarioGrid {
    pub fn rows(&self) -> usize {
        self.max_dice_count as usize
    }

    pub fn columns(&self) -> usize {
        self.die_sides.len()
    }

    /// Average damage for one cell, if it is part of the grid
    pub fn get(&self, dice_count: u32, die_sides: u32) -> Option<f64> {
        if dice_count == 0 || dice_count > self.max_dice_count {
            return None;
        }
        let column = self.die_sides.iter().position(|&s| s == die_sides)?;
        self.cells
            .get((dice_count as usize - 1) * self.columns() + column)
            .copied()
    }

    /// One row of averages, in column order
    pub fn row(&self, dice_count: u32) -> Option<&[f64]> {
        if dice_count == 0 || dice_count > self.max_dice_count {
            return None;
        }
        let start = (dice_count as usize - 1) * self.columns();
        self.cells.get(start..start + self.columns())
    }

    /// Iterate `(dice_count, row)` pairs from 1 upwards
    pub fn iter_rows(&self) -> impl Iterator<Item = (u32, &[f64])> + '_ {
        (1..=self.max_dice_count).zip(self.cells.chunks(self.columns().max(1)))
    }
}

fn check_sweep(max_dice_count: u32, die_sides: &[u32], trials_per_cell: u32) -> RulesResult<()> {
    if max_dice_count == 0 {
        return Err(RulesError::invalid("a sweep needs at least one dice count"));
    }
    if die_sides.is_empty() {
        return Err(RulesError::invalid("a sweep needs at least one die size"));
    }
    if let Some(&bad) = die_sides.iter().find(|&&s| s < 2) {
        return Err(RulesError::invalid(format!(
            "dice need at least two sides, got d{bad}"
        )));
    }
    if let Some(dup) = first_duplicate(die_sides) {
        return Err(RulesError::invalid(format!("d{dup} appears twice in the sweep")));
    }
    if trials_per_cell == 0 {
        return Err(RulesError::invalid("trial count must be at least 1"));
    }
    Ok(())
}

/// First die size listed more than once, if any
pub(crate) fn first_duplicate(die_sides: &[u32]) -> Option<u32> {
    die_sides
        .iter()
        .enumerate()
        .find(|&(i, s)| die_sides[..i].contains(s))
        .map(|(_, &s)| s)
}

/// Estimate every cell in parallel, each cell on the thread-local RNG
pub fn sweep_scenario(
    profile: &ScenarioProfile,
    max_dice_count: u32,
    die_sides: &[u32],
    trials_per_cell: u32,
) -> RulesResult<ScenarioGrid> {
    run_sweep(profile, max_dice_count, die_sides, trials_per_cell, |_, attack| {
        estimate_average_damage(&attack, trials_per_cell)
    })
}

/// Reproducible sweep: cell `i` (row-major) draws from a ChaCha8 stream
/// seeded with `seed + i`
pub fn sweep_scenario_seeded(
    profile: &ScenarioProfile,
    max_dice_count: u32,
    die_sides: &[u32],
    trials_per_cell: u32,
    seed: u64,
) -> RulesResult<ScenarioGrid> {
    run_sweep(profile, max_dice_count, die_sides, trials_per_cell, |index, attack| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64));
        estimate_average_damage_with_rng(&attack, trials_per_cell, &mut rng)
    })
}

fn run_sweep<F>(
    profile: &ScenarioProfile,
    max_dice_count: u32,
    die_sides: &[u32],
    trials_per_cell: u32,
    estimate_cell: F,
) -> RulesResult<ScenarioGrid>
where
    F: Fn(usize, AttackConfiguration) -> RulesResult<f64> + Sync + Send,
{
    check_sweep(max_dice_count, die_sides, trials_per_cell)?;

    let start = Instant::now();
    let columns = die_sides.len();
    let cell_count = max_dice_count as usize * columns;
    info!(
        "Starting scenario sweep: {} cells x {} trials ({})",
        cell_count, trials_per_cell, profile
    );

    let cells = (0..cell_count)
        .into_par_iter()
        .map(|index| {
            let dice_count = (index / columns) as u32 + 1;
            let sides = die_sides[index % columns];
            let average = estimate_cell(index, profile.attack(dice_count, sides))?;
            debug!(dice_count, sides, average, "cell done");
            Ok(average)
        })
        .collect::<RulesResult<Vec<f64>>>()?;

    info!(
        "Scenario sweep complete: {} cells in {:.2}s",
        cell_count,
        start.elapsed().as_secs_f64()
    );

    Ok(ScenarioGrid {
        profile: *profile,
        trials_per_cell,
        max_dice_count,
        die_sides: die_sides.to_vec(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArmorTier, CritRule};

    #[test]
    fn test_grid_shape() {
        let grid = sweep_scenario(&ScenarioProfile::default(), 3, &[4, 6], 500).unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 2);
        for dice in 1..=3 {
            for sides in [4, 6] {
                let value = grid.get(dice, sides).unwrap();
                assert!(value.is_finite() && value > 0.0);
            }
        }
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(4, 4), None);
        assert_eq!(grid.get(1, 8), None);
    }

    #[test]
    fn test_rows_follow_column_order() {
        let grid = sweep_scenario_seeded(&ScenarioProfile::default(), 2, &[12, 4], 2_000, 1).unwrap();
        let rows: Vec<(u32, Vec<f64>)> = grid
            .iter_rows()
            .map(|(dice, row)| (dice, row.to_vec()))
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[1].0, 2);
        // d12 column comes first and averages higher than d4
        assert!(rows[0].1[0] > rows[0].1[1]);
        assert_eq!(grid.row(2).unwrap(), rows[1].1.as_slice());
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let profile = ScenarioProfile {
            advantage: 1,
            vicious: true,
            bonus_damage: 2,
            armor: ArmorTier::Heavy,
            crit_rule: CritRule::Tactical,
        };
        let a = sweep_scenario_seeded(&profile, 3, &[4, 6, 8], 1_000, 99).unwrap();
        let b = sweep_scenario_seeded(&profile, 3, &[4, 6, 8], 1_000, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_sweep_keeps_shape() {
        let profile = ScenarioProfile::default();
        let a = sweep_scenario(&profile, 3, &[4, 6], 200).unwrap();
        let b = sweep_scenario(&profile, 3, &[4, 6], 200).unwrap();

        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.die_sides, b.die_sides);
        for dice in 1..=3 {
            for sides in [4, 6] {
                assert!(a.get(dice, sides).is_some());
                assert!(b.get(dice, sides).is_some());
            }
        }
    }

    #[test]
    fn test_more_dice_more_damage() {
        let grid = sweep_scenario_seeded(&ScenarioProfile::default(), 4, &[6], 5_000, 5).unwrap();
        let first = grid.get(1, 6).unwrap();
        let last = grid.get(4, 6).unwrap();
        assert!(last > first);
    }

    #[test]
    fn test_invalid_sweeps() {
        let profile = ScenarioProfile::default();
        assert!(sweep_scenario(&profile, 0, &[6], 10).is_err());
        assert!(sweep_scenario(&profile, 2, &[], 10).is_err());
        assert!(sweep_scenario(&profile, 2, &[6], 0).is_err());
        assert!(matches!(
            sweep_scenario(&profile, 2, &[6, 1], 10),
            Err(RulesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_duplicate_die_sizes_rejected() {
        let profile = ScenarioProfile::default();
        assert!(matches!(
            sweep_scenario(&profile, 2, &[6, 6], 10),
            Err(RulesError::InvalidArgument(_))
        ));
        assert!(sweep_scenario_seeded(&profile, 2, &[4, 8, 4], 10, 3).is_err());
        assert_eq!(first_duplicate(&[4, 6, 8]), None);
        assert_eq!(first_duplicate(&[4, 6, 8, 6]), Some(6));
    }
}
