//! Core math modules.

pub mod order;
pub mod root;
