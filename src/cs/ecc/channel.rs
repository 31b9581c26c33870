//! Binary symmetric channel simulation.
//!
//! Every bit is flipped independently with a fixed probability. Randomness comes
//! from a ChaCha20 generator whose seed is always recorded, so any run can be
//! replayed with [`NoisyChannel::with_seed`].

use crate::cs::ecc::Result;
use crate::error::Error;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Noisy binary channel with a replayable random source
#[derive(Debug, Clone)]
pub struct NoisyChannel {
    /// Seed the generator was created from
    seed: u64,
    /// Random number generator driving the bit flips
    rng: ChaCha20Rng,
}

impl NoisyChannel {
    /// Creates a channel seeded from the thread-local entropy source
    pub fn new() -> Self {
        Self::with_seed(thread_rng().gen::<u64>())
    }

    /// Creates a channel with a fixed seed for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// The seed this channel was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sends a bit vector through the channel.
    ///
    /// For each position a uniform draw in `[0, 1)` is taken; a draw strictly below
    /// `flip_probability` flips the bit, otherwise it is copied. A probability of 0
    /// never flips and a probability of 1 always flips. The generator keeps its
    /// state between calls.
    ///
    /// # Arguments
    ///
    /// * `bits` - Vector with entries in {0, 1}
    /// * `flip_probability` - Per-bit corruption probability in `[0, 1]`
    pub fn transmit(&mut self, bits: &[i32], flip_probability: f64) -> Vec<i32> {
        debug_assert!(
            (0.0..=1.0).contains(&flip_probability),
            "flip probability {} outside [0, 1]",
            flip_probability
        );

        bits.iter()
            .map(|&bit| {
                if self.rng.gen::<f64>() < flip_probability {
                    flip(bit)
                } else {
                    bit
                }
            })
            .collect()
    }
}

impl Default for NoisyChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn flip(bit: i32) -> i32 {
    if bit == 0 {
        1
    } else {
        0
    }
}

/// Lists every index at which two equal-length vectors differ.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vectors have different lengths.
pub fn distorted_positions(before: &[i32], after: &[i32]) -> Result<Vec<usize>> {
    if before.len() != after.len() {
        return Err(Error::dimension_mismatch(
            "channel output",
            before.len(),
            after.len(),
        ));
    }

    Ok(before
        .iter()
        .zip(after)
        .enumerate()
        .filter_map(|(i, (a, b))| (a != b).then_some(i))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_probability_is_identity() {
        let mut channel = NoisyChannel::new();
        let bits = vec![0, 1, 1, 0, 1, 0, 0, 1];
        for _ in 0..10 {
            assert_eq!(channel.transmit(&bits, 0.0), bits);
        }
    }

    #[test]
    fn test_full_probability_is_complement() {
        let mut channel = NoisyChannel::new();
        let bits = vec![0, 1, 1, 0, 1, 0, 0, 1];
        let complement: Vec<i32> = bits.iter().map(|&b| 1 - b).collect();
        for _ in 0..10 {
            assert_eq!(channel.transmit(&bits, 1.0), complement);
        }
    }

    #[test]
    fn test_same_seed_replays_run() {
        let bits = vec![0; 256];
        let mut first = NoisyChannel::with_seed(1234);
        let mut second = NoisyChannel::with_seed(first.seed());

        for _ in 0..5 {
            assert_eq!(first.transmit(&bits, 0.3), second.transmit(&bits, 0.3));
        }
    }

    #[test]
    fn test_state_is_not_reset_between_calls() {
        let bits = vec![0; 256];
        let mut channel = NoisyChannel::with_seed(99);
        let first = channel.transmit(&bits, 0.5);
        let second = channel.transmit(&bits, 0.5);
        assert_ne!(first, second);
    }

    #[test]
    fn test_flip_rate_matches_probability() {
        let bits = vec![0; 100_000];
        let mut channel = NoisyChannel::with_seed(42);
        let output = channel.transmit(&bits, 0.1);

        let rate = output.iter().filter(|&&b| b == 1).count() as f64 / bits.len() as f64;
        assert_abs_diff_eq!(rate, 0.1, epsilon = 0.01);
    }

    #[test]
    fn test_distorted_positions() {
        let before = [0, 1, 1, 0, 1];
        let after = [1, 1, 0, 0, 0];
        assert_eq!(distorted_positions(&before, &after).unwrap(), vec![0, 2, 4]);
        assert!(distorted_positions(&before, &before).unwrap().is_empty());
        assert!(matches!(
            distorted_positions(&before, &after[..3]),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_distorted_positions_match_channel_output() {
        let bits = vec![1; 64];
        let mut channel = NoisyChannel::with_seed(5);
        let output = channel.transmit(&bits, 0.25);
        let positions = distorted_positions(&bits, &output).unwrap();

        assert_eq!(positions.len(), output.iter().filter(|&&b| b == 0).count());
        assert!(positions.iter().all(|&i| output[i] == 0));
    }
}
