//! External service clients.

pub mod airplay;
pub mod cast;
