#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
