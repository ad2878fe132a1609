use super::interface::{bits_from_bytes, int_from_bytes};
use crate::{ByteSupplier, RandomError, RandomSource};

/// A byte-oriented [`RandomSource`] backed by a [`ByteSupplier`].
///
/// Integers are synthesized by packing four supplied bytes big-endian.
/// Counter draws only request the bytes they need (see
/// [`RandomSource::next_bits`]).
///
/// # Example
/// ```
/// use tsid::{ByteRandom, RandomError, RandomSource};
///
/// let mut rng = ByteRandom::new(|buf: &mut [u8]| -> Result<(), RandomError> {
///     buf.fill(0x7F);
///     Ok(())
/// });
/// assert_eq!(rng.next_int().unwrap(), 0x7F7F_7F7F);
/// assert_eq!(rng.next_bits(12).unwrap(), 0xF7F);
/// ```
#[derive(Clone, Debug)]
pub struct ByteRandom<S> {
    supplier: S,
}

impl<S: ByteSupplier> ByteRandom<S> {
    /// Wraps a byte supplier.
    pub const fn new(supplier: S) -> Self {
        Self { supplier }
    }

    /// Consumes the wrapper and returns the supplier.
    pub fn into_inner(self) -> S {
        self.supplier
    }
}

impl<S: ByteSupplier> RandomSource for ByteRandom<S> {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        int_from_bytes(|buf| self.supplier.fill_bytes(buf))
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        self.supplier.fill_bytes(buf)
    }

    fn next_bits(&mut self, bits: u32) -> Result<u32, RandomError> {
        bits_from_bytes(bits, |buf| self.supplier.fill_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn next_int_packs_big_endian() {
        let mut rng = ByteRandom::new(|buf: &mut [u8]| -> Result<(), RandomError> {
            for (i, b) in buf.iter_mut().enumerate() {
                *b = i as u8 + 1;
            }
            Ok(())
        });
        assert_eq!(rng.next_int().unwrap(), 0x0102_0304);
    }

    #[test]
    fn counter_draw_requests_minimal_bytes() {
        let mut lengths = Vec::new();
        let mut rng = ByteRandom::new(|buf: &mut [u8]| -> Result<(), RandomError> {
            lengths.push(buf.len());
            buf.fill(0xFF);
            Ok(())
        });

        assert_eq!(rng.next_bits(22).unwrap(), 0x3F_FFFF);
        assert_eq!(rng.next_bits(12).unwrap(), 0xFFF);
        assert_eq!(rng.next_bits(2).unwrap(), 0b11);
        drop(rng);

        assert_eq!(lengths, [3, 2, 1]);
    }

    #[test]
    fn supplier_errors_propagate() {
        let mut rng = ByteRandom::new(|_: &mut [u8]| Err::<(), _>(RandomError::new("no entropy")));
        assert!(rng.next_int().is_err());
        assert!(rng.next_bits(10).is_err());
        assert!(rng.next_bytes(&mut [0_u8; 8]).is_err());
    }
}
