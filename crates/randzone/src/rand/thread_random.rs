use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// This is the CSPRNG every core component draws from: the fairness engine
/// consumes `u32` words, the digit generator consumes bytes.
#[derive(Default, Clone)]
pub struct ThreadRandom;

impl RandSource<u8> for ThreadRandom {
    fn rand(&self) -> u8 {
        rng().random()
    }
}

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> u32 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
