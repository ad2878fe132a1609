use crate::TSID_CHARS;
use alloc::string::String;
use core::fmt;

/// A stack buffer holding the 13-character Crockford Base32 form of a TSID.
///
/// Returned by [`Tsid::encode`] and [`Tsid::encode_lower`]. It implements
/// [`fmt::Display`] and [`AsRef<str>`] without allocating.
///
/// # Example
/// ```
/// use tsid::Tsid;
///
/// let id = Tsid::from_number(121_706_220_661_772_722);
/// let formatter = id.encode();
/// assert_eq!(formatter, "03C3356RR04DJ");
/// assert_eq!(formatter.as_str().len(), 13);
/// ```
///
/// [`Tsid::encode`]: crate::Tsid::encode
/// [`Tsid::encode_lower`]: crate::Tsid::encode_lower
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base32Formatter {
    buf: [u8; TSID_CHARS],
}

impl Base32Formatter {
    pub(crate) const fn new(buf: [u8; TSID_CHARS]) -> Self {
        Self { buf }
    }

    /// Returns a `&str` view of the base32 encoding.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        // SAFETY: `self.buf` holds only valid Crockford Base32 ASCII characters
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Consumes the formatter and returns the raw buffer.
    #[must_use]
    pub const fn into_inner(self) -> [u8; TSID_CHARS] {
        self.buf
    }
}

impl fmt::Display for Base32Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Base32Formatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Base32Formatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Base32Formatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Base32Formatter {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<Base32Formatter> for String {
    fn from(formatter: Base32Formatter) -> Self {
        Self::from(formatter.as_str())
    }
}
