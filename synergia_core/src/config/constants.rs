//! Simulation constants configuration

use super::ConfigError;
use crate::dice::constants::STANDARD_DIE_SIDES;
use serde::{Deserialize, Serialize};

/// Tunable simulation constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConstants {
    #[serde(default)]
    pub dice: DiceConstants,
    #[serde(default)]
    pub trials: TrialConstants,
}

impl SimulationConstants {
    /// Die sizes accepted for a single-configuration analysis
    pub fn single_test_die_sides(&self) -> Vec<u32> {
        let mut sides = self.dice.standard_die_sides.clone();
        for &extra in &self.dice.single_test_extra_sides {
            if !sides.contains(&extra) {
                sides.push(extra);
            }
        }
        sides
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice.standard_die_sides.is_empty() {
            return Err(ConfigError::ValidationError(
                "standard_die_sides must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .single_test_die_sides()
            .into_iter()
            .find(|&s| s < 2)
        {
            return Err(ConfigError::ValidationError(format!(
                "die size d{bad} needs at least two sides"
            )));
        }
        if self.dice.max_dice_count == 0 {
            return Err(ConfigError::ValidationError(
                "max_dice_count must be at least 1".to_string(),
            ));
        }
        if i32::try_from(self.dice.max_advantage).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "max_advantage must be at most {}",
                i32::MAX
            )));
        }
        if self.trials.single_test == 0 || self.trials.scenario == 0 {
            return Err(ConfigError::ValidationError(
                "trial counts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceConstants {
    /// Die sizes swept by scenario mode
    #[serde(default = "default_standard_die_sides")]
    pub standard_die_sides: Vec<u32>,
    /// Extra die sizes allowed only for single tests (the d20)
    #[serde(default = "default_single_test_extra_sides")]
    pub single_test_extra_sides: Vec<u32>,
    /// Largest dice count accepted from user input
    #[serde(default = "default_max_dice_count")]
    pub max_dice_count: u32,
    /// Largest advantage or disadvantage magnitude accepted from user input
    #[serde(default = "default_max_advantage")]
    pub max_advantage: u32,
}

impl Default for DiceConstants {
    fn default() -> Self {
        DiceConstants {
            standard_die_sides: default_standard_die_sides(),
            single_test_extra_sides: default_single_test_extra_sides(),
            max_dice_count: default_max_dice_count(),
            max_advantage: default_max_advantage(),
        }
    }
}

fn default_standard_die_sides() -> Vec<u32> {
    STANDARD_DIE_SIDES.to_vec()
}
fn default_single_test_extra_sides() -> Vec<u32> {
    vec![20]
}
fn default_max_dice_count() -> u32 {
    50
}
fn default_max_advantage() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialConstants {
    /// Trials for a single-configuration analysis
    #[serde(default = "default_single_test_trials")]
    pub single_test: u32,
    /// Trials per grid cell in scenario mode
    #[serde(default = "default_scenario_trials")]
    pub scenario: u32,
}

impl Default for TrialConstants {
    fn default() -> Self {
        TrialConstants {
            single_test: default_single_test_trials(),
            scenario: default_scenario_trials(),
        }
    }
}

fn default_single_test_trials() -> u32 {
    300_000
}
fn default_scenario_trials() -> u32 {
    100_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_defaults() {
        let constants = SimulationConstants::default();
        assert_eq!(constants.dice.standard_die_sides, vec![4, 6, 8, 10, 12]);
        assert_eq!(constants.single_test_die_sides(), vec![4, 6, 8, 10, 12, 20]);
        assert_eq!(constants.dice.max_dice_count, 50);
        assert_eq!(constants.dice.max_advantage, 10);
        assert_eq!(constants.trials.single_test, 300_000);
        assert_eq!(constants.trials.scenario, 100_000);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let constants: SimulationConstants = parse_toml(
            r#"
[trials]
scenario = 5000
"#,
        )
        .unwrap();
        assert_eq!(constants.trials.scenario, 5000);
        assert_eq!(constants.trials.single_test, 300_000);
        assert_eq!(constants.dice, DiceConstants::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut constants = SimulationConstants::default();
        constants.dice.single_test_extra_sides = vec![1];
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut constants = SimulationConstants::default();
        constants.trials.scenario = 0;
        assert!(constants.validate().is_err());

        let mut constants = SimulationConstants::default();
        constants.dice.max_advantage = i32::MAX as u32 + 1;
        assert!(constants.validate().is_err());
    }
}
