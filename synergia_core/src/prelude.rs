//! Prelude module for convenient imports
//!
//! ```rust
//! use synergia_core::prelude::*;
//! ```

// Core types
pub use crate::error::{RulesError, RulesResult};
pub use crate::types::{ArmorTier, CritRule};

// Dice
pub use crate::dice::RandomSource;

// Combat
pub use crate::combat::{
    resolve_attack, resolve_attack_with_rng, AttackConfiguration, RollOutcome, RollStatus,
    ScenarioProfile, TraceEntry,
};

// Analysis
pub use crate::probability::{compute_probability_summary, ProbabilitySummary};
pub use crate::simulation::{
    analyze_configuration, estimate_average_damage, sweep_scenario, RollAnalysis, ScenarioGrid,
};

// Config
pub use crate::config::{default_scenario, ScenarioConfig, SimulationConstants};
