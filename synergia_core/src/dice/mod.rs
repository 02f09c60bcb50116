//! Dice engine - primitive rolls built on an injectable random source

mod engine;
mod source;
mod variants;

pub use engine::{roll_drop_highest, roll_drop_lowest, roll_explode, roll_n};
pub(crate) use engine::roll_die;
pub use source::RandomSource;
#[cfg(test)]
pub(crate) use source::ScriptedRolls;
pub use variants::{roll_nimble, roll_witcher_d10, NimbleRoll};

/// Dice constants
pub mod constants {
    /// Die sizes used by the scenario sweep
    pub const STANDARD_DIE_SIDES: [u32; 5] = [4, 6, 8, 10, 12];

    /// Upper bound on chained explosions in a single roll
    ///
    /// Even on a d2 the chance of reaching this is far below anything a
    /// simulation will ever draw.
    pub const MAX_EXPLOSION_CHAIN: u32 = 10_000;

    /// Primary dice kept in a roll's trace; extra advantage dice still count
    /// towards the kept value
    pub const MAX_RECORDED_PRIMARY_ROLLS: usize = 16;
}
