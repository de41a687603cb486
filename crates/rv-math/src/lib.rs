//! rvalue math utilities.

pub mod math;

pub use math::order::*;
pub use math::root::*;
