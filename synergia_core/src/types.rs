//! Core enums shared across the rule set

use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protection worn by the defender
///
/// Ordered from weakest to strongest. Tactical critical hits walk the tier
/// down one step at a time (see [`crate::defense::degrade_armor`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorTier {
    #[serde(alias = "s")]
    None,
    #[serde(alias = "m")]
    Medium,
    #[serde(alias = "p")]
    Heavy,
    #[serde(alias = "b")]
    Reinforced,
}

impl ArmorTier {
    /// Get all armor tiers, weakest first
    pub fn all() -> &'static [ArmorTier] {
        &[
            ArmorTier::None,
            ArmorTier::Medium,
            ArmorTier::Heavy,
            ArmorTier::Reinforced,
        ]
    }

    /// Single-letter tag used by the rule sheets (s, m, p, b)
    pub fn tag(self) -> char {
        match self {
            ArmorTier::None => 's',
            ArmorTier::Medium => 'm',
            ArmorTier::Heavy => 'p',
            ArmorTier::Reinforced => 'b',
        }
    }
}

impl fmt::Display for ArmorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArmorTier::None => "none",
            ArmorTier::Medium => "medium",
            ArmorTier::Heavy => "heavy",
            ArmorTier::Reinforced => "reinforced",
        };
        f.write_str(name)
    }
}

impl FromStr for ArmorTier {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "none" => Ok(ArmorTier::None),
            "m" | "medium" => Ok(ArmorTier::Medium),
            "p" | "heavy" => Ok(ArmorTier::Heavy),
            "b" | "reinforced" => Ok(ArmorTier::Reinforced),
            other => Err(RulesError::invalid(format!("unknown armor tier '{other}'"))),
        }
    }
}

/// How a critical hit interacts with armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CritRule {
    /// Armor is ignored for the rest of the attack
    #[serde(alias = "e")]
    Epic,
    /// Armor degrades one tier, plus one more per exploding max roll
    #[serde(alias = "t")]
    Tactical,
}

impl CritRule {
    pub fn all() -> &'static [CritRule] {
        &[CritRule::Epic, CritRule::Tactical]
    }

    pub fn tag(self) -> char {
        match self {
            CritRule::Epic => 'e',
            CritRule::Tactical => 't',
        }
    }
}

impl fmt::Display for CritRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CritRule::Epic => f.write_str("epic"),
            CritRule::Tactical => f.write_str("tactical"),
        }
    }
}

impl FromStr for CritRule {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "epic" => Ok(CritRule::Epic),
            "t" | "tactical" => Ok(CritRule::Tactical),
            other => Err(RulesError::invalid(format!("unknown crit rule '{other}'"))),
        }
    }
}
