mod crockford;
mod error;
mod formatter;

pub use crockford::TSID_CHARS;
pub(crate) use crockford::{ALPHABET_LOWER, ALPHABET_UPPER, decode_base32, encode_base32};
pub use error::*;
pub use formatter::*;
