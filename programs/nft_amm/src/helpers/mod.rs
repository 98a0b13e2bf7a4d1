pub mod access;
pub mod allowlist;
pub mod curve;
pub mod pda;

pub use access::*;
pub use allowlist::*;
pub use curve::*;
pub use pda::*;
