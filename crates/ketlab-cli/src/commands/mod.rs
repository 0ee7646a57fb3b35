//! CLI command implementations.

pub mod backends;
pub mod bits;
pub mod circuit;
pub mod common;
pub mod script;
pub mod version;
