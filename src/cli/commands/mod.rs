//! CLI command implementations.

pub mod broadcast;
pub mod displays;
pub mod list;
pub mod play;
