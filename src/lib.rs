//! opencast Library
//!
//! Classifies local video files into movies and TV episodes, and keeps a set
//! of AirPlay displays either playing or showing an idle image.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, Result};
