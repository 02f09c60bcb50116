//! Scenario sweep configuration loading

use super::ConfigError;
use crate::combat::ScenarioProfile;
use crate::dice::constants::STANDARD_DIE_SIDES;
use crate::simulation::{first_duplicate, sweep_scenario, sweep_scenario_seeded, ScenarioGrid};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete scenario sweep: attack profile plus grid bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub profile: ScenarioProfile,
    #[serde(default = "default_max_dice_count")]
    pub max_dice_count: u32,
    #[serde(default = "default_die_sides")]
    pub die_sides: Vec<u32>,
    #[serde(default = "default_trials_per_cell")]
    pub trials_per_cell: u32,
    /// Fixed seed for a reproducible sweep
    #[serde(default)]
    pub seed: Option<u64>,
    /// CSV file the sweep is written to
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_max_dice_count() -> u32 {
    10
}
fn default_die_sides() -> Vec<u32> {
    STANDARD_DIE_SIDES.to_vec()
}
fn default_trials_per_cell() -> u32 {
    100_000
}
fn default_output() -> String {
    "synergia_cenario_output.csv".to_string()
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            profile: ScenarioProfile::default(),
            max_dice_count: default_max_dice_count(),
            die_sides: default_die_sides(),
            trials_per_cell: default_trials_per_cell(),
            seed: None,
            output: default_output(),
        }
    }
}

impl ScenarioConfig {
    /// Check the sweep bounds against the largest dice count allowed
    pub fn validate(&self, max_dice_limit: u32) -> Result<(), ConfigError> {
        if self.max_dice_count == 0 || self.max_dice_count > max_dice_limit {
            return Err(ConfigError::ValidationError(format!(
                "max_dice_count must be between 1 and {max_dice_limit}, got {}",
                self.max_dice_count
            )));
        }
        if self.die_sides.is_empty() {
            return Err(ConfigError::ValidationError(
                "die_sides must not be empty".to_string(),
            ));
        }
        if let Some(&bad) = self.die_sides.iter().find(|&&s| s < 2) {
            return Err(ConfigError::ValidationError(format!(
                "die size d{bad} needs at least two sides"
            )));
        }
        if let Some(dup) = first_duplicate(&self.die_sides) {
            return Err(ConfigError::ValidationError(format!(
                "die size d{dup} is listed more than once"
            )));
        }
        if self.trials_per_cell == 0 {
            return Err(ConfigError::ValidationError(
                "trials_per_cell must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Run the sweep this configuration describes
    pub fn run(&self) -> Result<ScenarioGrid, ConfigError> {
        let grid = match self.seed {
            Some(seed) => sweep_scenario_seeded(
                &self.profile,
                self.max_dice_count,
                &self.die_sides,
                self.trials_per_cell,
                seed,
            )?,
            None => sweep_scenario(
                &self.profile,
                self.max_dice_count,
                &self.die_sides,
                self.trials_per_cell,
            )?,
        };
        Ok(grid)
    }
}

/// Load a scenario configuration from a TOML file
pub fn load_scenario_config(path: &Path) -> Result<ScenarioConfig, ConfigError> {
    super::load_toml(path)
}

/// Load a scenario configuration from a TOML string
pub fn parse_scenario_config(content: &str) -> Result<ScenarioConfig, ConfigError> {
    super::parse_toml(content)
}

/// Get the bundled default scenario
pub fn default_scenario() -> ScenarioConfig {
    let toml = include_str!("../../config/scenario.toml");
    parse_scenario_config(toml).unwrap_or_default()
}
