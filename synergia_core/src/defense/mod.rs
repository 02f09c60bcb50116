//! Defense system - armor tiers and how they blunt an attack

mod armor;

pub use armor::{apply_armor_reduction, bonus_after_armor, degrade_armor};
