//! Attack resolution - run one AttackConfiguration through the rules

use super::config::{net_advantage, AttackConfiguration};
use super::result::{DegradeCause, RollOutcome, RollStatus, TraceEntry};
use crate::defense::{apply_armor_reduction, bonus_after_armor};
use crate::dice::constants::{MAX_EXPLOSION_CHAIN, MAX_RECORDED_PRIMARY_ROLLS};
use crate::dice::{roll_die, RandomSource};
use crate::error::RulesResult;
use crate::types::{ArmorTier, CritRule};
use tracing::{debug, warn};

/// Resolve a single attack (uses the thread-local RNG)
///
/// The resolution walks these stages in order:
/// 1. Reinforced armor imposes one step of disadvantage
/// 2. The primary die is rolled (keep max under advantage, min under disadvantage)
/// 3. A primary of 1 is a miss and ends the attack with 0 damage
/// 4. The remaining dice are rolled and summed
/// 5. A primary on the max face is a critical: epic crits strip armor,
///    tactical crits degrade it, vicious adds a die
/// 6. Critical hits explode while the max face keeps coming up
/// 7. Bonus damage is added unless the surviving armor negates it
/// 8. Any remaining armor halves the total (floor), clamped at 0
pub fn resolve_attack(config: &AttackConfiguration) -> RulesResult<RollOutcome> {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(config, &mut rng)
}

/// Resolve an attack with a provided random source (for deterministic testing)
pub fn resolve_attack_with_rng(
    config: &AttackConfiguration,
    rng: &mut impl RandomSource,
) -> RulesResult<RollOutcome> {
    config.validate()?;
    let sides = config.die_sides;
    let mut state = ResolutionState::new(config.armor);

    // Armor adjustment
    let advantage = net_advantage(config.advantage, state.armor);
    if advantage != config.advantage {
        state.log.push(TraceEntry::ArmorDisadvantage {
            before: config.advantage,
            after: advantage,
        });
    }

    // Primary roll
    let (primary_rolls, primary) = roll_primary(sides, advantage, rng);
    state.log.push(TraceEntry::PrimaryRoll {
        rolls: primary_rolls.clone(),
        kept: primary,
        advantage,
    });

    if primary == 1 {
        state.log.push(TraceEntry::Miss);
        debug!(attack = %config, "primary rolled 1, miss");
        return Ok(RollOutcome {
            final_damage: 0,
            status: RollStatus::Miss,
            final_armor: state.armor,
            primary_rolls,
            primary_roll: primary,
            secondary_rolls: Vec::new(),
            vicious_roll: None,
            explosion_rolls: Vec::new(),
            raw_total: 0,
            armor_degradations: 0,
            log: state.log,
        });
    }

    // Secondary roll
    let secondary_rolls: Vec<u32> = (1..config.dice_count)
        .map(|_| roll_die(sides, rng))
        .collect();
    if !secondary_rolls.is_empty() {
        state.log.push(TraceEntry::SecondaryRolls {
            rolls: secondary_rolls.clone(),
        });
    }
    state.add(primary);
    for &value in &secondary_rolls {
        state.add(value);
    }

    // Critical handling
    let mut status = RollStatus::Hit;
    let mut vicious_roll = None;
    if primary == sides {
        status = match config.crit_rule {
            CritRule::Epic => {
                state.armor = ArmorTier::None;
                state.log.push(TraceEntry::CriticalEpic);
                RollStatus::CriticalEpic
            }
            CritRule::Tactical => {
                state.degrade(DegradeCause::TacticalCritical);
                RollStatus::CriticalTactical
            }
        };

        if config.vicious {
            let value = roll_die(sides, rng);
            state.add(value);
            state.log.push(TraceEntry::ViciousRoll { value });
            vicious_roll = Some(value);
        }

        state.explode(primary, sides, config.crit_rule, rng);
    }

    // Armor reduction
    let bonus = bonus_after_armor(config.bonus_damage, state.armor);
    if config.bonus_damage != 0 {
        if bonus == config.bonus_damage {
            state.log.push(TraceEntry::BonusApplied { bonus });
        } else {
            state.log.push(TraceEntry::BonusNegated {
                bonus: config.bonus_damage,
                armor: state.armor,
            });
        }
    }
    let raw_total = state.total + i64::from(bonus);

    // Finalize
    let reduced = apply_armor_reduction(raw_total, state.armor);
    if state.armor.halves_damage() {
        state.log.push(TraceEntry::DamageHalved {
            armor: state.armor,
            before: raw_total,
            after: reduced,
        });
    }
    let final_damage = if reduced < 0 {
        state.log.push(TraceEntry::DamageClamped { total: reduced });
        0
    } else {
        reduced as u64
    };

    debug!(
        attack = %config,
        %status,
        final_damage,
        final_armor = %state.armor,
        explosions = state.explosion_rolls.len(),
        "attack resolved"
    );

    Ok(RollOutcome {
        final_damage,
        status,
        final_armor: state.armor,
        primary_rolls,
        primary_roll: primary,
        secondary_rolls,
        vicious_roll,
        explosion_rolls: state.explosion_rolls,
        raw_total,
        armor_degradations: state.degradations,
        log: state.log,
    })
}

/// Roll `|advantage| + 1` dice and keep the max (advantage) or min (disadvantage)
///
/// Only the first `MAX_RECORDED_PRIMARY_ROLLS` dice are kept for the trace.
fn roll_primary(sides: u32, advantage: i32, rng: &mut impl RandomSource) -> (Vec<u32>, u32) {
    let first = roll_die(sides, rng);
    let mut rolls = vec![first];
    let mut kept = first;
    for _ in 0..advantage.unsigned_abs() {
        let value = roll_die(sides, rng);
        kept = if advantage > 0 {
            kept.max(value)
        } else {
            kept.min(value)
        };
        if rolls.len() < MAX_RECORDED_PRIMARY_ROLLS {
            rolls.push(value);
        }
    }
    (rolls, kept)
}

/// Mutable state for a single resolution
struct ResolutionState {
    armor: ArmorTier,
    total: i64,
    degradations: u32,
    explosion_rolls: Vec<u32>,
    log: Vec<TraceEntry>,
}

impl ResolutionState {
    fn new(armor: ArmorTier) -> Self {
        ResolutionState {
            armor,
            total: 0,
            degradations: 0,
            explosion_rolls: Vec::new(),
            log: Vec::new(),
        }
    }

    fn add(&mut self, value: u32) {
        self.total += i64::from(value);
    }

    fn degrade(&mut self, cause: DegradeCause) {
        let from = self.armor;
        self.armor = from.degrade();
        self.degradations += 1;
        self.log.push(TraceEntry::ArmorDegraded {
            from,
            to: self.armor,
            cause,
        });
    }

    /// Keep rolling single dice while the current value sits on the max face
    fn explode(&mut self, primary: u32, sides: u32, rule: CritRule, rng: &mut impl RandomSource) {
        let mut current = primary;
        while current == sides {
            let chain = self.explosion_rolls.len() as u32;
            if chain >= MAX_EXPLOSION_CHAIN {
                warn!(sides, chain, "explosion chain hit the safety cap");
                self.log.push(TraceEntry::ExplosionCapReached { chain });
                return;
            }

            let value = roll_die(sides, rng);
            self.add(value);
            self.explosion_rolls.push(value);
            self.log.push(TraceEntry::Explosion { value });

            if rule == CritRule::Tactical && value == sides {
                self.degrade(DegradeCause::Explosion);
            }
            current = value;
        }
    }
}
