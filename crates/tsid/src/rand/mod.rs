mod byte_random;
mod crypto;
mod error;
mod fast;
mod int_random;
mod interface;

pub use byte_random::*;
pub use crypto::*;
pub use error::*;
pub use fast::*;
pub use int_random::*;
pub use interface::*;
