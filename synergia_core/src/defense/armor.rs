//! Armor - tier degradation and damage reduction

use crate::types::ArmorTier;

impl ArmorTier {
    /// One step down the chain `Reinforced → Heavy → Medium → None → None`
    pub fn degrade(self) -> ArmorTier {
        match self {
            ArmorTier::Reinforced => ArmorTier::Heavy,
            ArmorTier::Heavy => ArmorTier::Medium,
            ArmorTier::Medium => ArmorTier::None,
            ArmorTier::None => ArmorTier::None,
        }
    }

    /// Reinforced armor makes the attacker roll with one step of disadvantage
    pub fn imposes_disadvantage(self) -> bool {
        self == ArmorTier::Reinforced
    }

    /// Heavy and Reinforced armor cancel fixed bonus damage entirely
    pub fn negates_bonus(self) -> bool {
        matches!(self, ArmorTier::Heavy | ArmorTier::Reinforced)
    }

    /// Any armor at all halves the damage that gets through
    pub fn halves_damage(self) -> bool {
        self != ArmorTier::None
    }
}

/// Degrade armor by one tier
pub fn degrade_armor(armor: ArmorTier) -> ArmorTier {
    armor.degrade()
}

/// Bonus damage that survives the defender's armor
pub fn bonus_after_armor(bonus: i32, armor: ArmorTier) -> i32 {
    if armor.negates_bonus() {
        0
    } else {
        bonus
    }
}

/// Apply armor halving to a damage total
///
/// Uses floor division, so odd negative totals round towards negative
/// infinity. Callers clamp the final value.
pub fn apply_armor_reduction(total: i64, armor: ArmorTier) -> i64 {
    if armor.halves_damage() {
        total.div_euclid(2)
    } else {
        total
    }
}
