//! synergia_core - Rule engine for the Synergia tabletop damage system
//!
//! This library provides:
//! - Dice engine: plain, drop-lowest/highest and exploding rolls on an injectable RNG
//! - Attack resolution: advantage, misses, criticals, explosions and armor
//! - Probability model: exact miss and critical chances
//! - Monte Carlo estimation: average damage per configuration and scenario grids

pub mod combat;
pub mod config;
pub mod defense;
pub mod dice;
pub mod error;
pub mod prelude;
pub mod probability;
pub mod simulation;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    resolve_attack, resolve_attack_with_rng, AttackConfiguration, RollOutcome, RollStatus,
    ScenarioProfile, TraceEntry,
};
pub use config::{default_scenario, ConfigError, ScenarioConfig, SimulationConstants};
pub use defense::degrade_armor;
pub use dice::{roll_drop_highest, roll_drop_lowest, roll_explode, roll_n, RandomSource};
pub use error::{RulesError, RulesResult};
pub use probability::{compute_probability_summary, flat_average_damage, ProbabilitySummary};
pub use simulation::{
    analyze_configuration, estimate_average_damage, estimate_damage_profile, sweep_scenario,
    sweep_scenario_seeded, DamageEstimate, RollAnalysis, ScenarioGrid,
};
pub use types::{ArmorTier, CritRule};
