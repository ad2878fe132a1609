use crate::DecodeError;

/// Number of characters in the canonical string form.
pub const TSID_CHARS: usize = 13;

pub(crate) const ALPHABET_UPPER: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
pub(crate) const ALPHABET_LOWER: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u64 = 0x1F;
/// The leading character only carries 4 bits; its fifth bit must be clear.
const OVERFLOW_BIT: u8 = 0b1_0000;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET_UPPER[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i;
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes a 64-bit value into 13 Crockford base32 characters using the
/// given alphabet.
///
/// The 13 five-bit groups span 65 bits, so the leading character only ever
/// carries the top 4 bits of the value.
pub(crate) const fn encode_base32(value: u64, alphabet: &[u8; 32]) -> [u8; TSID_CHARS] {
    let mut buf = [0_u8; TSID_CHARS];
    let mut i = 0;
    while i < TSID_CHARS {
        let shift = (TSID_CHARS - 1 - i) as u32 * BITS_PER_CHAR;
        buf[i] = alphabet[((value >> shift) & CHAR_MASK) as usize];
        i += 1;
    }
    buf
}

/// Decodes a 13-character Crockford base32 string into a 64-bit value.
///
/// Decoding is case-insensitive and maps `I`/`L` to `1` and `O` to `0`.
pub(crate) fn decode_base32(encoded: &str) -> Result<u64, DecodeError> {
    let bytes = encoded.as_bytes();
    if bytes.len() != TSID_CHARS {
        return Err(DecodeError::InvalidLength {
            len: bytes.len(),
            expected: TSID_CHARS,
        });
    }

    let mut acc = 0_u64;
    for (index, &byte) in bytes.iter().enumerate() {
        let value = LOOKUP[byte as usize];
        if value == NO_VALUE {
            return Err(DecodeError::InvalidAscii { byte, index });
        }
        if index == 0 && value & OVERFLOW_BIT != 0 {
            return Err(DecodeError::Overflow { byte });
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(value);
    }

    Ok(acc)
}
