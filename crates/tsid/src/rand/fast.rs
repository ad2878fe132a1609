use crate::{RandomError, RandomSource};
use rand::{RngCore, SeedableRng, rngs::SmallRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// A fast, non-cryptographic [`RandomSource`] seeded from the current time.
///
/// This is the default random source of every factory. It never fails.
///
/// By default the generator is seeded once, at construction. Use
/// [`FastRandom::reseeding`] to reseed from the clock before every draw
/// instead, which trades distribution quality for independence between
/// draws.
///
/// Integers are non-negative (31 random bits).
#[derive(Clone)]
pub struct FastRandom {
    rng: SmallRng,
    reseed: bool,
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl FastRandom {
    /// Creates a generator seeded once from the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::seed_from_u64(time_seed()),
            reseed: false,
        }
    }

    /// Creates a generator that reseeds from the current time on every draw.
    #[must_use]
    pub fn reseeding() -> Self {
        Self {
            rng: SmallRng::seed_from_u64(time_seed()),
            reseed: true,
        }
    }

    /// Creates a generator from an explicit seed, seeded once.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            reseed: false,
        }
    }

    fn rng(&mut self) -> &mut SmallRng {
        if self.reseed {
            self.rng = SmallRng::seed_from_u64(time_seed());
        }
        &mut self.rng
    }
}

impl core::fmt::Debug for FastRandom {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastRandom")
            .field("reseed", &self.reseed)
            .finish_non_exhaustive()
    }
}

impl RandomSource for FastRandom {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        Ok((self.rng().next_u32() >> 1) as i32)
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        self.rng().fill_bytes(buf);
        Ok(())
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn integers_are_non_negative() {
        let mut rng = FastRandom::new();
        for _ in 0..10_000 {
            assert!(rng.next_int().unwrap() >= 0);
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = FastRandom::from_seed(7);
        let mut b = FastRandom::from_seed(7);
        for _ in 0..100 {
            assert_eq!(a.next_int().unwrap(), b.next_int().unwrap());
        }
    }

    #[test]
    fn counter_draws_are_spread() {
        let mut rng = FastRandom::new();
        let values: HashSet<u32> = (0..1_000).map(|_| rng.next_bits(22).unwrap()).collect();
        assert!(values.iter().all(|v| *v <= 0x3F_FFFF));
        assert!(values.len() > 900);
    }

    #[test]
    fn reseeding_generator_still_produces_values() {
        let mut rng = FastRandom::reseeding();
        let mut buf = [0_u8; 16];
        rng.next_bytes(&mut buf).unwrap();
        assert!(rng.next_int().unwrap() >= 0);
    }
}
