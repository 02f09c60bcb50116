//! RandomSource - the single seam through which the engine draws randomness

use rand::rngs::{StdRng, ThreadRng};
use rand_chacha::{ChaCha20Rng, ChaCha8Rng};
#[cfg(test)]
use std::collections::VecDeque;

/// Supplies uniformly distributed integers
///
/// Every dice operation goes through this trait so that tests can swap the
/// generator for a scripted sequence.
pub trait RandomSource {
    /// Uniform integer in `[low, high]`, inclusive on both ends
    fn roll_range(&mut self, low: u32, high: u32) -> u32;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).roll_range(low, high)
    }
}

macro_rules! impl_random_source_for_rng {
    ($($rng:ty),* $(,)?) => {
        $(
            impl RandomSource for $rng {
                fn roll_range(&mut self, low: u32, high: u32) -> u32 {
                    rand::Rng::gen_range(self, low..=high)
                }
            }
        )*
    };
}

impl_random_source_for_rng!(ThreadRng, StdRng, ChaCha8Rng, ChaCha20Rng);

/// Deterministic source that replays a fixed list of die faces
///
/// Each call consumes the next value. Panics when the script runs dry or a
/// value falls outside the requested range, since either means the test
/// scripted the wrong number of rolls.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRolls {
    values: VecDeque<u32>,
    consumed: usize,
}

#[cfg(test)]
impl ScriptedRolls {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        ScriptedRolls {
            values: values.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of values drawn so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of scripted values not yet drawn
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRolls {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        let value = match self.values.pop_front() {
            Some(value) => value,
            None => panic!(
                "scripted rolls exhausted after {} draws (wanted a value in {low}..={high})",
                self.consumed
            ),
        };
        assert!(
            (low..=high).contains(&value),
            "scripted roll {value} outside {low}..={high} at draw {}",
            self.consumed
        );
        self.consumed += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_scripted_rolls_replay_in_order() {
        let mut rolls = ScriptedRolls::new([3, 1, 6]);
        assert_eq!(rolls.roll_range(1, 6), 3);
        assert_eq!(rolls.roll_range(1, 6), 1);
        assert_eq!(rolls.roll_range(1, 6), 6);
        assert_eq!(rolls.consumed(), 3);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_rolls_panic_when_empty() {
        let mut rolls = ScriptedRolls::new([]);
        rolls.roll_range(1, 6);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_scripted_rolls_reject_out_of_range() {
        let mut rolls = ScriptedRolls::new([7]);
        rolls.roll_range(1, 6);
    }

    #[test]
    fn test_seeded_rng_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = rng.roll_range(1, 4);
            assert!((1..=4).contains(&value));
        }
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw(mut source: impl RandomSource) -> u32 {
            source.roll_range(1, 6)
        }

        let mut rolls = ScriptedRolls::new([2]);
        assert_eq!(draw(&mut rolls), 2);
        assert_eq!(rolls.consumed(), 1);
    }
}
