//! # Kage RBAC
//!
//! Role-Based Access Control for Kage.
//!
//! ## Components
//!
//! - `AccessPolicy` - Elevated-role, assignee and ownership gates
//! - `MissionUpdateScope` - Which mission fields an actor may change
//!   (`LeaderScope` for elevated actors, `AssigneeScope` for the team)

pub mod access_policy;
pub mod update_scope;

pub use access_policy::AccessPolicy;
pub use update_scope::{AssigneeScope, LeaderScope, MissionUpdateScope};
