//! Core business logic modules.

pub mod catalog;
pub mod context;
pub mod display;
pub mod identifier;
pub mod reconciler;
pub mod scanner;
