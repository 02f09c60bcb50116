//! AttackConfiguration - everything needed to resolve one attack

use crate::error::{RulesError, RulesResult};
use crate::types::{ArmorTier, CritRule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable description of a single attack roll
///
/// `advantage` is signed: 0 is a normal roll, positive values add dice and
/// keep the highest, negative values add dice and keep the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackConfiguration {
    /// Number of damage dice, including the primary die
    pub dice_count: u32,
    /// Faces on each die
    pub die_sides: u32,
    #[serde(default)]
    pub advantage: i32,
    /// Adds one extra die on a critical hit
    #[serde(default)]
    pub vicious: bool,
    /// Fixed damage added after the dice (may be negative)
    #[serde(default)]
    pub bonus_damage: i32,
    /// Defender's armor at the start of the attack
    #[serde(default = "default_armor")]
    pub armor: ArmorTier,
    #[serde(default = "default_crit_rule")]
    pub crit_rule: CritRule,
}

fn default_armor() -> ArmorTier {
    ArmorTier::None
}

fn default_crit_rule() -> CritRule {
    CritRule::Epic
}

impl AttackConfiguration {
    /// A plain `XdY` attack: no advantage, no bonus, unarmored target, epic crits
    pub fn new(dice_count: u32, die_sides: u32) -> Self {
        AttackConfiguration {
            dice_count,
            die_sides,
            advantage: 0,
            vicious: false,
            bonus_damage: 0,
            armor: default_armor(),
            crit_rule: default_crit_rule(),
        }
    }

    pub fn with_advantage(mut self, advantage: i32) -> Self {
        self.advantage = advantage;
        self
    }

    pub fn with_vicious(mut self, vicious: bool) -> Self {
        self.vicious = vicious;
        self
    }

    pub fn with_bonus(mut self, bonus_damage: i32) -> Self {
        self.bonus_damage = bonus_damage;
        self
    }

    pub fn with_armor(mut self, armor: ArmorTier) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_crit_rule(mut self, crit_rule: CritRule) -> Self {
        self.crit_rule = crit_rule;
        self
    }

    /// Check the structural requirements of the rule engine
    pub fn validate(&self) -> RulesResult<()> {
        if self.dice_count < 1 {
            return Err(RulesError::invalid("an attack needs at least one die"));
        }
        if self.die_sides < 2 {
            return Err(RulesError::invalid(format!(
                "dice need at least two sides, got d{}",
                self.die_sides
            )));
        }
        Ok(())
    }

    /// Advantage after armor has had its say
    pub fn net_advantage(&self) -> i32 {
        net_advantage(self.advantage, self.armor)
    }
}

/// Advantage state once Reinforced armor's disadvantage is applied
pub fn net_advantage(advantage: i32, armor: ArmorTier) -> i32 {
    if armor.imposes_disadvantage() {
        advantage.saturating_sub(1)
    } else {
        advantage
    }
}

impl fmt::Display for AttackConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d{} | adv {:+} | vicious {} | bonus {:+} | armor {} | crit {}",
            self.dice_count,
            self.die_sides,
            self.advantage,
            if self.vicious { "yes" } else { "no" },
            self.bonus_damage,
            self.armor,
            self.crit_rule,
        )
    }
}

/// An attack scenario with the dice left open
///
/// The scenario sweep layers each `(dice_count, die_sides)` cell on top of
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProfile {
    #[serde(default)]
    pub advantage: i32,
    #[serde(default)]
    pub vicious: bool,
    #[serde(default)]
    pub bonus_damage: i32,
    #[serde(default = "default_armor")]
    pub armor: ArmorTier,
    #[serde(default = "default_crit_rule")]
    pub crit_rule: CritRule,
}

impl Default for ScenarioProfile {
    fn default() -> Self {
        ScenarioProfile {
            advantage: 0,
            vicious: false,
            bonus_damage: 0,
            armor: default_armor(),
            crit_rule: default_crit_rule(),
        }
    }
}

impl ScenarioProfile {
    /// Build the attack for one grid cell
    pub fn attack(&self, dice_count: u32, die_sides: u32) -> AttackConfiguration {
        AttackConfiguration {
            dice_count,
            die_sides,
            advantage: self.advantage,
            vicious: self.vicious,
            bonus_damage: self.bonus_damage,
            armor: self.armor,
            crit_rule: self.crit_rule,
        }
    }
}

impl fmt::Display for ScenarioProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "adv {:+} | vicious {} | bonus {:+} | armor {} | crit {}",
            self.advantage,
            if self.vicious { "yes" } else { "no" },
            self.bonus_damage,
            self.armor,
            self.crit_rule,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = AttackConfiguration::new(3, 8)
            .with_advantage(-2)
            .with_vicious(true)
            .with_bonus(4)
            .with_armor(ArmorTier::Heavy)
            .with_crit_rule(CritRule::Tactical);

        assert_eq!(config.dice_count, 3);
        assert_eq!(config.die_sides, 8);
        assert_eq!(config.advantage, -2);
        assert!(config.vicious);
        assert_eq!(config.bonus_damage, 4);
        assert_eq!(config.armor, ArmorTier::Heavy);
        assert_eq!(config.crit_rule, CritRule::Tactical);
    }

    #[test]
    fn test_validation() {
        assert!(AttackConfiguration::new(1, 6).validate().is_ok());
        assert!(AttackConfiguration::new(0, 6).validate().is_err());
        assert!(AttackConfiguration::new(1, 1).validate().is_err());
        assert!(AttackConfiguration::new(1, 20).validate().is_ok());
    }

    #[test]
    fn test_net_advantage() {
        let config = AttackConfiguration::new(1, 6).with_advantage(1);
        assert_eq!(config.net_advantage(), 1);
        assert_eq!(config.with_armor(ArmorTier::Reinforced).net_advantage(), 0);
        assert_eq!(net_advantage(i32::MIN, ArmorTier::Reinforced), i32::MIN);
    }

    #[test]
    fn test_profile_layers_dice() {
        let profile = ScenarioProfile {
            advantage: 1,
            vicious: true,
            bonus_damage: 2,
            armor: ArmorTier::Medium,
            crit_rule: CritRule::Tactical,
        };
        let attack = profile.attack(4, 10);
        assert_eq!(attack.dice_count, 4);
        assert_eq!(attack.die_sides, 10);
        assert_eq!(attack.armor, ArmorTier::Medium);
        assert!(attack.vicious);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: AttackConfiguration =
            toml::from_str("dice_count = 2\ndie_sides = 6\narmor = \"heavy\"").unwrap();
        assert_eq!(config.advantage, 0);
        assert_eq!(config.armor, ArmorTier::Heavy);
        assert_eq!(config.crit_rule, CritRule::Epic);
    }
}
