//! # Kage Shared
//!
//! Error taxonomy and configuration used across all Kage crates.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
