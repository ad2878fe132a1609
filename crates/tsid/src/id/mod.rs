mod layout;
mod tsid;

pub use layout::*;
pub use tsid::*;
