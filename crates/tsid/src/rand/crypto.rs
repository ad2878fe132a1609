use super::interface::{bits_from_bytes, int_from_bytes};
use crate::{ByteSupplier, RandomError, RandomSource};
use rand::{TryRngCore, rngs::OsRng};

/// A cryptographically secure, byte-oriented [`RandomSource`] reading from
/// the operating system.
///
/// There is no seeding. If the OS entropy source fails, the failure is
/// returned as a [`RandomError`].
#[derive(Default, Clone, Copy, Debug)]
pub struct CryptoRandom;

impl ByteSupplier for CryptoRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomError::new(alloc::format!("os entropy unavailable: {e}")))
    }
}

impl RandomSource for CryptoRandom {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        int_from_bytes(|buf| self.fill_bytes(buf))
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        self.fill_bytes(buf)
    }

    fn next_bits(&mut self, bits: u32) -> Result<u32, RandomError> {
        bits_from_bytes(bits, |buf| self.fill_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_buffers() {
        let mut a = [0_u8; 32];
        let mut b = [0_u8; 32];
        CryptoRandom.next_bytes(&mut a).unwrap();
        CryptoRandom.next_bytes(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn counter_draws_fit_the_field() {
        let mut rng = CryptoRandom;
        for bits in [2, 8, 12, 22] {
            for _ in 0..100 {
                assert!(rng.next_bits(bits).unwrap() < (1 << bits));
            }
        }
    }
}
