//! # Kage Domain Layer
//!
//! Ninjas, missions and villages - pure business vocabulary with zero
//! external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  filter/    - Conjunctive predicates for list queries       ││
//! │  │  repository/- Persistence ports (not implementations)       ││
//! │  │  port/      - Clock, credentials, notifications             ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! Storage engines, mail servers and hashing schemes live behind the
//! traits in `repository/` and `port/`.

pub mod filter;
pub mod model;
pub mod port;
pub mod repository;

// Re-export commonly used types
pub use filter::{Criterion, Filter, MissionCriteria, NinjaCriteria, VillageCriteria, VillageListing};
pub use model::{
    mission::{Difficulty, Mission, MissionId, MissionPatch, MissionStatus, StatusTransition},
    ninja::{Ninja, NinjaId},
    rank::Rank,
    role::RoleTag,
    time::Timestamp,
    village::{Village, VillageId},
    ParseEnumError,
};

pub use port::{
    clock::Clock,
    credential::CredentialHasher,
    notifier::{MissionAssigned, NinjaOnboarded, Notifier, NullNotifier, Recipient},
};

pub use repository::{
    mission_repository::MissionRepository, ninja_repository::NinjaRepository,
    village_repository::VillageRepository, RepositoryError, UnitOfWork,
};
