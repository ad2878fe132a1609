use crate::RandomError;
use alloc::boxed::Box;

/// A source of randomness for the counter field.
///
/// Every source exposes both capabilities: integer-oriented sources
/// synthesize bytes from integers, and byte-oriented sources synthesize
/// integers from bytes. Callers never need to know which kind they hold.
///
/// # Example
/// ```
/// use tsid::{RandomError, RandomSource};
///
/// struct FixedRand;
/// impl RandomSource for FixedRand {
///     fn next_int(&mut self) -> Result<i32, RandomError> {
///         Ok(1234)
///     }
///
///     fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
///         buf.fill(0xAB);
///         Ok(())
///     }
/// }
///
/// let mut rng = FixedRand;
/// assert_eq!(rng.next_int().unwrap(), 1234);
/// assert_eq!(rng.next_bits(8).unwrap(), 1234 & 0xFF);
/// ```
pub trait RandomSource {
    /// Returns a random 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying entropy source is unavailable.
    fn next_int(&mut self) -> Result<i32, RandomError>;

    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying entropy source is unavailable.
    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError>;

    /// Returns a random value confined to the low `bits` bits (`0..=32`).
    ///
    /// The default draws one integer and masks it. Byte-oriented sources
    /// override this to consume only as many bytes as `bits` requires.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying entropy source is unavailable.
    fn next_bits(&mut self, bits: u32) -> Result<u32, RandomError> {
        Ok((self.next_int()? as u32) & low_mask(bits))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        (**self).next_int()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        (**self).next_bytes(buf)
    }

    fn next_bits(&mut self, bits: u32) -> Result<u32, RandomError> {
        (**self).next_bits(bits)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        (**self).next_int()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        (**self).next_bytes(buf)
    }

    fn next_bits(&mut self, bits: u32) -> Result<u32, RandomError> {
        (**self).next_bits(bits)
    }
}

/// Supplies random integers to an [`IntRandom`].
///
/// Implemented for any `FnMut() -> Result<i32, RandomError>`.
///
/// [`IntRandom`]: crate::IntRandom
pub trait IntSupplier {
    /// Returns the next random integer.
    ///
    /// # Errors
    ///
    /// Returns an error if no integer could be produced.
    fn next_int(&mut self) -> Result<i32, RandomError>;
}

impl<F> IntSupplier for F
where
    F: FnMut() -> Result<i32, RandomError>,
{
    fn next_int(&mut self) -> Result<i32, RandomError> {
        self()
    }
}

/// Supplies random bytes to a [`ByteRandom`].
///
/// Implemented for any `FnMut(&mut [u8]) -> Result<(), RandomError>`.
///
/// [`ByteRandom`]: crate::ByteRandom
pub trait ByteSupplier {
    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer could not be filled.
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError>;
}

impl<F> ByteSupplier for F
where
    F: FnMut(&mut [u8]) -> Result<(), RandomError>,
{
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        self(buf)
    }
}

/// Mask selecting the low `bits` bits of a `u32`.
pub(crate) const fn low_mask(bits: u32) -> u32 {
    match bits {
        0 => 0,
        32.. => u32::MAX,
        _ => (1 << bits) - 1,
    }
}

/// Packs four big-endian bytes drawn from `fill` into an integer.
pub(crate) fn int_from_bytes(
    fill: impl FnOnce(&mut [u8]) -> Result<(), RandomError>,
) -> Result<i32, RandomError> {
    let mut buf = [0_u8; 4];
    fill(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Draws `((bits - 1) / 8) + 1` bytes, packs them big-endian and masks the
/// result to `bits`.
pub(crate) fn bits_from_bytes(
    bits: u32,
    fill: impl FnOnce(&mut [u8]) -> Result<(), RandomError>,
) -> Result<u32, RandomError> {
    if bits == 0 {
        return Ok(0);
    }
    let len = ((bits.min(32) - 1) / 8 + 1) as usize;
    let mut buf = [0_u8; 4];
    fill(&mut buf[4 - len..])?;
    Ok(u32::from_be_bytes(buf) & low_mask(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_mask_covers_edges() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(1), 1);
        assert_eq!(low_mask(12), 0xFFF);
        assert_eq!(low_mask(22), 0x3F_FFFF);
        assert_eq!(low_mask(32), u32::MAX);
    }

    #[test]
    fn bits_from_bytes_draws_minimal_bytes() {
        for (bits, expected_len) in [(1, 1), (8, 1), (9, 2), (16, 2), (17, 3), (22, 3), (32, 4)] {
            let mut seen = 0;
            let value = bits_from_bytes(bits, |buf| {
                seen = buf.len();
                buf.fill(0xFF);
                Ok(())
            })
            .unwrap();
            assert_eq!(seen, expected_len, "bits = {bits}");
            assert_eq!(value, low_mask(bits));
        }
    }

    #[test]
    fn int_from_bytes_is_big_endian() {
        let value = int_from_bytes(|buf| {
            buf.copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
            Ok(())
        })
        .unwrap();
        assert_eq!(value, 0x0102_0304);
    }

    #[test]
    fn default_next_bits_masks_an_integer() {
        struct Fixed;
        impl RandomSource for Fixed {
            fn next_int(&mut self) -> Result<i32, RandomError> {
                Ok(-1)
            }
            fn next_bytes(&mut self, _: &mut [u8]) -> Result<(), RandomError> {
                unreachable!()
            }
        }

        assert_eq!(Fixed.next_bits(10).unwrap(), 0x3FF);
        assert_eq!(Box::new(Fixed).next_bits(3).unwrap(), 0b111);
    }
}
