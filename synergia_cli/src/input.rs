//! Command-line input parsing and validation
//!
//! Everything here runs before the rule engine is called, so bad input is
//! reported in terms of what the user typed.

use crate::error::{CliError, CliResult};
use clap::Args;
use std::fmt;
use std::str::FromStr;
use synergia_core::{ArmorTier, AttackConfiguration, CritRule, SimulationConstants};

/// A roll written as `XdY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceNotation {
    pub count: u32,
    pub sides: u32,
}

impl FromStr for DiceNotation {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let invalid = || CliError::Input(format!("'{}' is not a roll, use XdY (e.g. 2d6)", s.trim()));

        let (count, sides) = lowered.split_once('d').ok_or_else(invalid)?;
        let count: u32 = count.parse().map_err(|_| invalid())?;
        let sides: u32 = sides.parse().map_err(|_| invalid())?;
        Ok(DiceNotation { count, sides })
    }
}

impl fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Check a single-test roll: at least one die, not too many, a known die size
pub fn validate_roll(roll: DiceNotation, constants: &SimulationConstants) -> CliResult<()> {
    validate_max_dice(roll.count, constants)?;
    let allowed = constants.single_test_die_sides();
    if !allowed.contains(&roll.sides) {
        return Err(CliError::Input(format!(
            "d{} is not a valid die, choose one of {:?}",
            roll.sides, allowed
        )));
    }
    Ok(())
}

/// Check a dice count against the configured limit
pub fn validate_max_dice(count: u32, constants: &SimulationConstants) -> CliResult<()> {
    let limit = constants.dice.max_dice_count;
    if count == 0 || count > limit {
        return Err(CliError::Input(format!(
            "dice count must be between 1 and {limit}, got {count}"
        )));
    }
    Ok(())
}

/// Check an advantage value against the configured magnitude limit
pub fn validate_advantage(advantage: i32, constants: &SimulationConstants) -> CliResult<()> {
    let limit = constants.dice.max_advantage;
    if advantage.unsigned_abs() > limit {
        return Err(CliError::Input(format!(
            "advantage must be between -{limit} and {limit}, got {advantage}"
        )));
    }
    Ok(())
}

/// Options describing one attack
#[derive(Args, Debug, Clone)]
pub struct AttackArgs {
    /// Roll in XdY notation, e.g. 2d6
    pub roll: DiceNotation,

    /// Advantage state (1 = advantage, -1 = disadvantage, 0 = normal)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub advantage: i32,

    /// Add one extra die on a critical hit
    #[arg(long)]
    pub vicious: bool,

    /// Fixed bonus damage
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub bonus: i32,

    /// Target armor: s (none), m (medium), p (heavy), b (reinforced)
    #[arg(long, default_value = "s")]
    pub armor: ArmorTier,

    /// Critical rule: e (epic) or t (tactical)
    #[arg(long, default_value = "e")]
    pub crit: CritRule,
}

impl AttackArgs {
    /// Validate the roll and build the attack
    pub fn to_configuration(&self, constants: &SimulationConstants) -> CliResult<AttackConfiguration> {
        validate_roll(self.roll, constants)?;
        validate_advantage(self.advantage, constants)?;
        let config = AttackConfiguration::new(self.roll.count, self.roll.sides)
            .with_advantage(self.advantage)
            .with_vicious(self.vicious)
            .with_bonus(self.bonus)
            .with_armor(self.armor)
            .with_crit_rule(self.crit);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        assert_eq!(
            "2d6".parse::<DiceNotation>().unwrap(),
            DiceNotation { count: 2, sides: 6 }
        );
        assert_eq!(
            " 10D12 ".parse::<DiceNotation>().unwrap(),
            DiceNotation { count: 10, sides: 12 }
        );
    }

    #[test]
    fn test_reject_bad_notation() {
        for bad in ["", "d6", "2d", "2x6", "2d6d6", "-1d6", "twod6"] {
            assert!(bad.parse::<DiceNotation>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_validate_roll() {
        let constants = SimulationConstants::default();
        assert!(validate_roll(DiceNotation { count: 1, sides: 20 }, &constants).is_ok());
        assert!(validate_roll(DiceNotation { count: 3, sides: 6 }, &constants).is_ok());
        assert!(validate_roll(DiceNotation { count: 0, sides: 6 }, &constants).is_err());
        assert!(validate_roll(DiceNotation { count: 51, sides: 6 }, &constants).is_err());
        assert!(validate_roll(DiceNotation { count: 1, sides: 7 }, &constants).is_err());
    }

    #[test]
    fn test_validate_max_dice() {
        let constants = SimulationConstants::default();
        assert!(validate_max_dice(1, &constants).is_ok());
        assert!(validate_max_dice(50, &constants).is_ok());
        assert!(validate_max_dice(0, &constants).is_err());
        assert!(validate_max_dice(51, &constants).is_err());
    }

    #[test]
    fn test_validate_advantage() {
        let constants = SimulationConstants::default();
        assert!(validate_advantage(0, &constants).is_ok());
        assert!(validate_advantage(10, &constants).is_ok());
        assert!(validate_advantage(-10, &constants).is_ok());
        assert!(validate_advantage(11, &constants).is_err());
        assert!(validate_advantage(i32::MIN, &constants).is_err());
    }

    #[test]
    fn test_args_reject_out_of_range_advantage() {
        let constants = SimulationConstants::default();
        for advantage in [i32::MAX, -i32::MAX, i32::MIN, 11, -11] {
            let args = AttackArgs {
                roll: DiceNotation { count: 1, sides: 6 },
                advantage,
                vicious: false,
                bonus: 0,
                armor: ArmorTier::None,
                crit: CritRule::Epic,
            };
            let err = args.to_configuration(&constants).unwrap_err();
            assert!(matches!(err, CliError::Input(_)), "{advantage}: {err}");
        }
    }

    #[test]
    fn test_args_to_configuration() {
        let args = AttackArgs {
            roll: DiceNotation { count: 2, sides: 8 },
            advantage: -1,
            vicious: true,
            bonus: 3,
            armor: ArmorTier::Medium,
            crit: CritRule::Tactical,
        };
        let config = args.to_configuration(&SimulationConstants::default()).unwrap();
        assert_eq!(config.dice_count, 2);
        assert_eq!(config.die_sides, 8);
        assert_eq!(config.advantage, -1);
        assert_eq!(config.armor, ArmorTier::Medium);
        assert_eq!(config.crit_rule, CritRule::Tactical);
    }
}
