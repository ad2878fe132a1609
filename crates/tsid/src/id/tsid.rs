use crate::{
    ALPHABET_LOWER, ALPHABET_UPPER, Base32Formatter, DecodeError, RANDOM_BITS, RANDOM_MASK,
    SystemClock, TIME_MASK, TSID_BYTES, TSID_EPOCH, TimeSource, counter_bits, counter_mask,
    decode_base32, encode_base32, node_mask,
};
use alloc::string::String;
use core::{fmt, str::FromStr};
use portable_atomic::{AtomicU32, Ordering};

/// A time-sorted unique identifier.
///
/// A `Tsid` is a 64-bit value laid out as:
///
/// ```text
///  Bit Index:  63           22 21                  0
///              +--------------+---------------------+
///  Field:      |  time (42)   | node (n) | counter  |
///              +--------------+---------------------+
///              |<---- MSB ---- 64 bits ---- LSB --->|
/// ```
///
/// - `time` is the number of milliseconds since the custom epoch.
/// - `node` occupies the high `n` bits (0 to 20) of the random field.
/// - `counter` occupies the remaining `22 - n` bits.
///
/// Ordering by value is ordering by creation time, then node, then counter.
/// The binary form is 8 bytes big-endian and the text form is 13 Crockford
/// Base32 characters.
///
/// # Example
/// ```
/// use tsid::Tsid;
///
/// let id: Tsid = "03C3356RR04DJ".parse().unwrap();
/// assert_eq!(id.to_number(), 121_706_220_661_772_722);
/// assert_eq!(id.to_bytes(), [1, 176, 99, 41, 177, 128, 17, 178]);
/// assert_eq!(id.to_string(), "03C3356RR04DJ");
/// assert_eq!(id.to_lower_case(), "03c3356rr04dj");
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct Tsid {
    number: i64,
}

static FAST_COUNTER: AtomicU32 = AtomicU32::new(0);

impl Tsid {
    /// Wraps a raw 64-bit value.
    #[must_use]
    pub const fn from_number(number: i64) -> Self {
        Self { number }
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn to_number(&self) -> i64 {
        self.number
    }

    /// Unpacks a big-endian 8-byte array.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TSID_BYTES]) -> Self {
        Self::from_number(i64::from_be_bytes(bytes))
    }

    /// Packs the value into a big-endian 8-byte array.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; TSID_BYTES] {
        self.number.to_be_bytes()
    }

    /// Decodes a 13-character Crockford Base32 string.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the string has the wrong length, contains
    /// a character outside the alphabet, or its first character would
    /// overflow 64 bits.
    pub fn from_string(s: &str) -> Result<Self, DecodeError> {
        decode_base32(s).map(|raw| Self::from_number(raw as i64))
    }

    /// Returns `true` if `s` can be decoded by [`Tsid::from_string`].
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        decode_base32(s).is_ok()
    }

    /// Returns an upper-case Base32 formatter that does not allocate.
    #[must_use]
    pub const fn encode(&self) -> Base32Formatter {
        Base32Formatter::new(encode_base32(self.number as u64, ALPHABET_UPPER))
    }

    /// Returns a lower-case Base32 formatter that does not allocate.
    #[must_use]
    pub const fn encode_lower(&self) -> Base32Formatter {
        Base32Formatter::new(encode_base32(self.number as u64, ALPHABET_LOWER))
    }

    /// Encodes the value as 13 lower-case Base32 characters.
    #[must_use]
    pub fn to_lower_case(&self) -> String {
        self.encode_lower().into()
    }

    /// The 42-bit time field: milliseconds since the custom epoch.
    #[must_use]
    pub const fn time(&self) -> u64 {
        ((self.number as u64) >> RANDOM_BITS) & TIME_MASK
    }

    /// The low 22 bits holding node and counter.
    #[must_use]
    pub const fn random(&self) -> u32 {
        ((self.number as u64) & RANDOM_MASK) as u32
    }

    /// The node field, for a factory configured with `node_bits`.
    #[must_use]
    pub const fn node(&self, node_bits: u32) -> u32 {
        (self.random() >> counter_bits(node_bits)) & node_mask(node_bits)
    }

    /// The counter field, for a factory configured with `node_bits`.
    #[must_use]
    pub const fn counter(&self, node_bits: u32) -> u32 {
        self.random() & counter_mask(node_bits)
    }

    /// Creation time in milliseconds since the Unix epoch, assuming the
    /// default [`TSID_EPOCH`].
    #[must_use]
    pub const fn unix_millis(&self) -> i64 {
        self.unix_millis_with_epoch(TSID_EPOCH)
    }

    /// Creation time in milliseconds since the Unix epoch for an id built
    /// with `custom_epoch`.
    #[must_use]
    pub const fn unix_millis_with_epoch(&self, custom_epoch: i64) -> i64 {
        self.time() as i64 + custom_epoch
    }

    /// Creates an id without a factory.
    ///
    /// The time field is the current system time since [`TSID_EPOCH`] and the
    /// random field is a process-wide counter, incremented before each use and
    /// wrapped to 22 bits. No node is encoded. Ids are unique within the
    /// process as long as fewer than 2^22 are created per millisecond.
    ///
    /// ```
    /// use tsid::Tsid;
    ///
    /// let a = Tsid::fast();
    /// let b = Tsid::fast();
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn fast() -> Self {
        let elapsed = (SystemClock.current_millis() - TSID_EPOCH) as u64 & TIME_MASK;
        let counter = FAST_COUNTER.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let random = u64::from(counter) & RANDOM_MASK;
        Self::from_number(((elapsed << RANDOM_BITS) | random) as i64)
    }
}

impl fmt::Display for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode().as_str())
    }
}

impl fmt::Debug for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tsid")
            .field("number", &self.number)
            .field("string", &self.encode().as_str())
            .field("time", &self.time())
            .field("random", &self.random())
            .finish()
    }
}

impl FromStr for Tsid {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<&str> for Tsid {
    type Error = DecodeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_string(s)
    }
}

impl TryFrom<&[u8]> for Tsid {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; TSID_BYTES] = bytes.try_into().map_err(|_| DecodeError::InvalidLength {
            len: bytes.len(),
            expected: TSID_BYTES,
        })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl From<[u8; TSID_BYTES]> for Tsid {
    fn from(bytes: [u8; TSID_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Tsid> for [u8; TSID_BYTES] {
    fn from(id: Tsid) -> Self {
        id.to_bytes()
    }
}

impl From<i64> for Tsid {
    fn from(number: i64) -> Self {
        Self::from_number(number)
    }
}

impl From<Tsid> for i64 {
    fn from(id: Tsid) -> Self {
        id.to_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use std::collections::HashSet;

    const KNOWN: i64 = 121_706_220_661_772_722;
    const KNOWN_STR: &str = "03C3356RR04DJ";
    const KNOWN_BYTES: [u8; 8] = [1, 176, 99, 41, 177, 128, 17, 178];

    #[test]
    fn known_value_decodes_to_number_and_bytes() {
        let id = Tsid::from_string(KNOWN_STR).unwrap();
        assert_eq!(id.to_number(), KNOWN);
        assert_eq!(id.to_bytes(), KNOWN_BYTES);
        assert_eq!(Tsid::from_bytes(KNOWN_BYTES), id);
        assert_eq!(id.to_string(), KNOWN_STR);
        assert_eq!(id.encode(), KNOWN_STR);
        assert_eq!(id.to_lower_case(), "03c3356rr04dj");
    }

    #[test]
    fn known_value_fields() {
        let id = Tsid::from_number(KNOWN);
        assert_eq!(id.unix_millis(), 1_701_548_224_198);
        assert_eq!(id.random(), 4530);
        assert_eq!(id.time() as i64, 1_701_548_224_198 - TSID_EPOCH);
        assert_eq!(id.unix_millis_with_epoch(0), 1_701_548_224_198 - TSID_EPOCH);
    }

    #[test]
    fn node_and_counter_split_random_field() {
        let node_bits = 10;
        let node = 500_u64;
        let counter = 0xABC_u64;
        let raw = (7 << RANDOM_BITS) | (node << counter_bits(node_bits)) | counter;
        let id = Tsid::from_number(raw as i64);
        assert_eq!(id.time(), 7);
        assert_eq!(id.node(node_bits), 500);
        assert_eq!(id.counter(node_bits), 0xABC);
        assert_eq!(id.node(0), 0);
        assert_eq!(id.counter(0), id.random());
    }

    #[test]
    fn text_and_binary_forms_roundtrip() {
        for raw in [0, 1, KNOWN, i64::MAX, -1, i64::MIN, 0x0123_4567_89AB_CDEF] {
            let id = Tsid::from_number(raw);
            let text = id.to_string();
            assert_eq!(text.len(), 13);
            assert!(Tsid::is_valid(&text));
            assert_eq!(Tsid::from_string(&text).unwrap(), id);
            assert_eq!(Tsid::from_string(&id.to_lower_case()).unwrap(), id);
            assert_eq!(Tsid::from_bytes(id.to_bytes()), id);
        }
    }

    #[test]
    fn string_validation() {
        assert!(Tsid::is_valid(KNOWN_STR));
        assert!(Tsid::is_valid("03c3356rr04dj"));
        assert!(Tsid::is_valid("0ILO356RR04DJ"));
        assert!(!Tsid::is_valid(""));
        assert!(!Tsid::is_valid("03C3356RR04D"));
        assert!(!Tsid::is_valid("03C3356RR04DJ0"));
        assert!(!Tsid::is_valid("03C3356RR04DU"));
        assert!(!Tsid::is_valid("03C3356RR04D-"));
        assert!(!Tsid::is_valid("G3C3356RR04DJ"));
    }

    #[test]
    fn decode_errors_are_not_zero() {
        let err = Tsid::from_string("ZZZZZZZZZZZZZ").unwrap_err();
        assert_eq!(err, DecodeError::Overflow { byte: b'Z' });
        let err: Result<Tsid, _> = "short".parse();
        assert_eq!(
            err.unwrap_err(),
            DecodeError::InvalidLength {
                len: 5,
                expected: 13
            }
        );
    }

    #[test]
    fn conversions() {
        let id = Tsid::try_from(KNOWN_STR).unwrap();
        assert_eq!(i64::from(id), KNOWN);
        assert_eq!(Tsid::from(KNOWN), id);
        assert_eq!(Tsid::try_from(&KNOWN_BYTES[..]).unwrap(), id);
        assert_eq!(<[u8; 8]>::from(id), KNOWN_BYTES);
        assert_eq!(
            Tsid::try_from(&KNOWN_BYTES[..7]).unwrap_err(),
            DecodeError::InvalidLength {
                len: 7,
                expected: 8
            }
        );
    }

    #[test]
    fn ordering_follows_time_then_random() {
        let a = Tsid::from_number((10 << RANDOM_BITS) | 0x3F_FFFF);
        let b = Tsid::from_number(11 << RANDOM_BITS);
        let c = Tsid::from_number((11 << RANDOM_BITS) | 1);
        assert!(a < b && b < c);
        assert!(a.to_string() < b.to_string());
        assert!(b.to_string() < c.to_string());
    }

    #[test]
    fn fast_ids_are_unique_and_current() {
        let before = SystemClock.current_millis();
        let ids: HashSet<Tsid> = (0..10_000).map(|_| Tsid::fast()).collect();
        let after = SystemClock.current_millis();
        assert_eq!(ids.len(), 10_000);
        for id in ids {
            assert!(id.unix_millis() >= before && id.unix_millis() <= after);
        }
    }

    #[test]
    fn debug_shows_fields() {
        let dbg = alloc::format!("{:?}", Tsid::from_number(KNOWN));
        assert!(dbg.contains("03C3356RR04DJ"));
        assert!(dbg.contains("random: 4530"));
    }
}
