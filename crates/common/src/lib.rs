//! Ambient helpers shared by the storage crates and the startup binary.

pub mod env;
pub mod utils;
