//! Monte Carlo damage estimates for a single configuration

use crate::combat::{resolve_attack_with_rng, AttackConfiguration, RollOutcome, RollStatus};
use crate::dice::RandomSource;
use crate::error::{RulesError, RulesResult};
use crate::probability::{compute_probability_summary, flat_average_damage, ProbabilitySummary};
use serde::{Deserialize, Serialize};

/// Aggregate statistics over many independent resolutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEstimate {
    pub trials: u32,
    pub total_damage: u64,
    pub miss_count: u32,
    pub hit_count: u32,
    pub crit_count: u32,
    /// Largest single-roll damage observed
    pub max_damage: u64,
    pub average_damage: f64,
}

impl DamageEstimate {
    fn record(&mut self, outcome: &RollOutcome) {
        match outcome.status {
            RollStatus::Miss => self.miss_count += 1,
            RollStatus::Hit => self.hit_count += 1,
            RollStatus::CriticalEpic | RollStatus::CriticalTactical => self.crit_count += 1,
        }
        self.total_damage = self.total_damage.saturating_add(outcome.final_damage);
        self.max_damage = self.max_damage.max(outcome.final_damage);
    }

    /// Fraction of trials that missed
    pub fn miss_rate(&self) -> f64 {
        rate(self.miss_count, self.trials)
    }

    /// Fraction of trials that were critical hits
    pub fn crit_rate(&self) -> f64 {
        rate(self.crit_count, self.trials)
    }

    /// Average damage over the trials that connected
    pub fn avg_damage_per_hit(&self) -> f64 {
        let connected = self.hit_count + self.crit_count;
        if connected > 0 {
            self.total_damage as f64 / connected as f64
        } else {
            0.0
        }
    }
}

fn rate(count: u32, trials: u32) -> f64 {
    if trials > 0 {
        count as f64 / trials as f64
    } else {
        0.0
    }
}

fn check_trials(trials: u32) -> RulesResult<()> {
    if trials == 0 {
        return Err(RulesError::invalid("trial count must be at least 1"));
    }
    Ok(())
}

/// Mean final damage over `trials` fresh resolutions (uses the thread-local RNG)
pub fn estimate_average_damage(config: &AttackConfiguration, trials: u32) -> RulesResult<f64> {
    let mut rng = rand::thread_rng();
    estimate_average_damage_with_rng(config, trials, &mut rng)
}

/// Mean final damage with a provided random source
pub fn estimate_average_damage_with_rng(
    config: &AttackConfiguration,
    trials: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<f64> {
    Ok(estimate_damage_profile_with_rng(config, trials, rng)?.average_damage)
}

/// Full hit/miss/crit statistics over `trials` resolutions
pub fn estimate_damage_profile(
    config: &AttackConfiguration,
    trials: u32,
) -> RulesResult<DamageEstimate> {
    let mut rng = rand::thread_rng();
    estimate_damage_profile_with_rng(config, trials, &mut rng)
}

pub fn estimate_damage_profile_with_rng(
    config: &AttackConfiguration,
    trials: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<DamageEstimate> {
    check_trials(trials)?;
    config.validate()?;

    let mut estimate = DamageEstimate {
        trials,
        total_damage: 0,
        miss_count: 0,
        hit_count: 0,
        crit_count: 0,
        max_damage: 0,
        average_damage: 0.0,
    };
    for _ in 0..trials {
        let outcome = resolve_attack_with_rng(config, rng)?;
        estimate.record(&outcome);
    }
    estimate.average_damage = estimate.total_damage as f64 / trials as f64;
    Ok(estimate)
}

/// Everything known about one configuration: exact odds, simulated damage and
/// one worked example roll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollAnalysis {
    pub configuration: AttackConfiguration,
    pub probability: ProbabilitySummary,
    /// `X * (Y + 1) / 2`, ignoring every special rule
    pub flat_average: f64,
    pub estimate: DamageEstimate,
    pub example: RollOutcome,
}

pub fn analyze_configuration(
    config: &AttackConfiguration,
    trials: u32,
) -> RulesResult<RollAnalysis> {
    let mut rng = rand::thread_rng();
    analyze_configuration_with_rng(config, trials, &mut rng)
}

pub fn analyze_configuration_with_rng(
    config: &AttackConfiguration,
    trials: u32,
    rng: &mut impl RandomSource,
) -> RulesResult<RollAnalysis> {
    let probability = compute_probability_summary(config.die_sides, config.advantage, config.armor)?;
    let estimate = estimate_damage_profile_with_rng(config, trials, rng)?;
    let example = resolve_attack_with_rng(config, rng)?;

    Ok(RollAnalysis {
        configuration: *config,
        probability,
        flat_average: flat_average_damage(config.dice_count, config.die_sides),
        estimate,
        example,
    })
}
