//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from kage-domain.

pub mod in_memory;

pub use in_memory::{
    InMemoryMissionRepository, InMemoryNinjaRepository, InMemoryStore, InMemoryUnitOfWork,
    InMemoryVillageRepository,
};
