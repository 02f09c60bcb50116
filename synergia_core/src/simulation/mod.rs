//! Monte Carlo estimation - single configurations and scenario grids

mod estimate;
mod scenario;

pub use estimate::{
    analyze_configuration, analyze_configuration_with_rng, estimate_average_damage,
    estimate_average_damage_with_rng, estimate_damage_profile, estimate_damage_profile_with_rng,
    DamageEstimate, RollAnalysis,
};
pub use scenario::{sweep_scenario, sweep_scenario_seeded, ScenarioGrid};
pub(crate) use scenario::first_duplicate;
