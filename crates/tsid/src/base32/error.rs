/// Errors produced while decoding a TSID from its string or byte form.
///
/// A failed decode never yields a value; in particular it is distinguishable
/// from the zero identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input does not have the fixed length of the encoding (13 chars
    /// for strings, 8 for byte arrays).
    #[error("invalid length: {len} (expected {expected})")]
    InvalidLength { len: usize, expected: usize },

    /// A byte of the input is not part of the Crockford Base32 alphabet.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    InvalidAscii { byte: u8, index: usize },

    /// The first character decodes to a value of 16 or more, which would
    /// not fit in 64 bits.
    #[error("decode overflow: leading byte {byte:#04x} exceeds 64 bits")]
    Overflow { byte: u8 },
}
