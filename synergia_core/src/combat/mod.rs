//! Combat resolution - turn an attack configuration into damage

mod config;
mod resolution;
mod result;

pub use config::{net_advantage, AttackConfiguration, ScenarioProfile};
pub use resolution::{resolve_attack, resolve_attack_with_rng};
pub use result::{DegradeCause, RollOutcome, RollStatus, TraceEntry};
