//! # Kage Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapter: authenticate, validate, call an engine,
//!   shape the response
//! - `gateway/` - Outbound adapters: clock, credential hashing, notifications
//! - `repository/` - Persistence implementations

pub mod controller;
pub mod gateway;
pub mod repository;
