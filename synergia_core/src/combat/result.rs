//! RollOutcome - Result of resolving one attack

use crate::types::ArmorTier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the primary die landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollStatus {
    Miss,
    Hit,
    CriticalEpic,
    CriticalTactical,
}

impl RollStatus {
    pub fn is_critical(self) -> bool {
        matches!(self, RollStatus::CriticalEpic | RollStatus::CriticalTactical)
    }
}

impl fmt::Display for RollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RollStatus::Miss => "Miss",
            RollStatus::Hit => "Hit",
            RollStatus::CriticalEpic => "Critical (Epic)",
            RollStatus::CriticalTactical => "Critical (Tactical)",
        };
        f.write_str(label)
    }
}

/// What knocked an armor tier down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeCause {
    TacticalCritical,
    Explosion,
}

/// One step of the resolution trace, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEntry {
    ArmorDisadvantage { before: i32, after: i32 },
    PrimaryRoll { rolls: Vec<u32>, kept: u32, advantage: i32 },
    Miss,
    SecondaryRolls { rolls: Vec<u32> },
    CriticalEpic,
    ArmorDegraded { from: ArmorTier, to: ArmorTier, cause: DegradeCause },
    ViciousRoll { value: u32 },
    Explosion { value: u32 },
    ExplosionCapReached { chain: u32 },
    BonusApplied { bonus: i32 },
    BonusNegated { bonus: i32, armor: ArmorTier },
    DamageHalved { armor: ArmorTier, before: i64, after: i64 },
    DamageClamped { total: i64 },
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::ArmorDisadvantage { before, after } => write!(
                f,
                "Reinforced armor imposes disadvantage (advantage {before:+} -> {after:+})"
            ),
            TraceEntry::PrimaryRoll { rolls, kept, advantage } => {
                if *advantage > 0 {
                    write!(f, "Primary with advantage: {rolls:?} -> kept {kept}")
                } else if *advantage < 0 {
                    write!(f, "Primary with disadvantage: {rolls:?} -> kept {kept}")
                } else {
                    write!(f, "Primary: {kept}")
                }
            }
            TraceEntry::Miss => f.write_str("Miss: primary die rolled 1"),
            TraceEntry::SecondaryRolls { rolls } => write!(f, "Secondary dice: {rolls:?}"),
            TraceEntry::CriticalEpic => f.write_str("Epic critical! Armor ignored"),
            TraceEntry::ArmorDegraded { from, to, cause } => match cause {
                DegradeCause::TacticalCritical => {
                    write!(f, "Tactical critical! Armor {from} -> {to}")
                }
                DegradeCause::Explosion => write!(f, "Critical explosion! Armor {from} -> {to}"),
            },
            TraceEntry::ViciousRoll { value } => write!(f, "Vicious die: {value}"),
            TraceEntry::Explosion { value } => write!(f, "Explosion: {value}"),
            TraceEntry::ExplosionCapReached { chain } => {
                write!(f, "Explosion chain stopped after {chain} rolls")
            }
            TraceEntry::BonusApplied { bonus } => write!(f, "Bonus damage {bonus:+}"),
            TraceEntry::BonusNegated { bonus, armor } => {
                write!(f, "Bonus {bonus:+} negated by {armor} armor")
            }
            TraceEntry::DamageHalved { armor, before, after } => {
                write!(f, "Damage halved by {armor} armor: {before} -> {after}")
            }
            TraceEntry::DamageClamped { total } => write!(f, "Damage {total} clamped to 0"),
        }
    }
}

/// Result of resolving an AttackConfiguration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    // === Result ===
    /// Damage dealt after armor (never negative)
    pub final_damage: u64,
    pub status: RollStatus,
    /// Armor tier once all degradation has been applied
    pub final_armor: ArmorTier,

    // === Dice ===
    /// Dice rolled for the primary, capped at `MAX_RECORDED_PRIMARY_ROLLS`
    pub primary_rolls: Vec<u32>,
    /// The primary die that was kept
    pub primary_roll: u32,
    pub secondary_rolls: Vec<u32>,
    pub vicious_roll: Option<u32>,
    pub explosion_rolls: Vec<u32>,

    // === Bookkeeping ===
    /// Dice plus surviving bonus, before halving
    pub raw_total: i64,
    /// Number of armor degradation steps applied
    pub armor_degradations: u32,
    /// Ordered, human-readable trace of the resolution
    pub log: Vec<TraceEntry>,
}

impl RollOutcome {
    pub fn is_miss(&self) -> bool {
        self.status == RollStatus::Miss
    }

    pub fn is_critical(&self) -> bool {
        self.status.is_critical()
    }

    /// Sum of the secondary dice
    pub fn secondary_sum(&self) -> u64 {
        self.secondary_rolls.iter().map(|&r| u64::from(r)).sum()
    }

    /// Trace lines, one per event
    pub fn trace_lines(&self) -> Vec<String> {
        self.log.iter().map(|entry| entry.to_string()).collect()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.is_miss() {
            return "Miss - 0 damage".to_string();
        }

        let mut parts = vec![format!("{} - {} damage", self.status, self.final_damage)];
        if !self.explosion_rolls.is_empty() {
            parts.push(format!("{} explosions", self.explosion_rolls.len()));
        }
        if self.armor_degradations > 0 {
            parts.push(format!(
                "armor degraded {}x to {}",
                self.armor_degradations, self.final_armor
            ));
        }
        parts.join(", ")
    }
}
