use crate::{IntSupplier, RandomError, RandomSource};

/// An integer-oriented [`RandomSource`] backed by an [`IntSupplier`].
///
/// Bytes are synthesized from integers: each drawn integer provides 32 bits
/// of entropy that are handed out 8 bits at a time, most significant byte
/// first. Leftover bits are kept for the next call, so requesting one byte
/// at a time consumes one integer per four bytes.
///
/// # Example
/// ```
/// use tsid::{IntRandom, RandomError, RandomSource};
///
/// let mut rng = IntRandom::new(|| Ok::<_, RandomError>(0x0102_0304));
/// assert_eq!(rng.next_int().unwrap(), 0x0102_0304);
///
/// let mut buf = [0_u8; 4];
/// rng.next_bytes(&mut buf).unwrap();
/// assert_eq!(buf, [1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct IntRandom<S> {
    supplier: S,
    buffer: u32,
    remaining: u32,
}

impl<S: IntSupplier> IntRandom<S> {
    /// Wraps an integer supplier.
    pub const fn new(supplier: S) -> Self {
        Self {
            supplier,
            buffer: 0,
            remaining: 0,
        }
    }

    /// Consumes the wrapper and returns the supplier.
    pub fn into_inner(self) -> S {
        self.supplier
    }
}

impl<S: IntSupplier> RandomSource for IntRandom<S> {
    fn next_int(&mut self) -> Result<i32, RandomError> {
        self.supplier.next_int()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        for byte in buf {
            if self.remaining < 8 {
                self.buffer = self.supplier.next_int()? as u32;
                self.remaining = 32;
            }
            self.remaining -= 8;
            *byte = (self.buffer >> self.remaining) as u8;
        }
        Ok(())
    }
}
