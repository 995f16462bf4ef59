//! # Kage Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters:
//! every engine is handed its repositories, a unit of work and the outbound
//! ports, and knows nothing about how any of them are implemented.
//!
//! ## Engines
//!
//! - [`MissionService`] - create, update (leader or assignee scope), delete
//! - [`VillageCoordinator`] - one Kage per village, dissolution
//! - [`NinjaService`] - enlisting, self-service and leader updates
//! - [`Authenticator`] - principal and password checks

pub mod detail;
pub mod identity;
pub mod mission_lifecycle;
pub mod ninja_service;
pub mod request;
pub mod transaction;
pub mod village_coordinator;

pub use detail::{MissionDetail, NinjaDetail};
pub use identity::Authenticator;
pub use mission_lifecycle::MissionService;
pub use ninja_service::NinjaService;
pub use request::{
    CreateMissionRequest, CreateNinjaRequest, CreateVillageRequest, LeaderUpdateRequest,
    RegisterNinjaRequest, SelfUpdateRequest, UpdateMissionRequest, UpdateVillageRequest, Validate,
};
pub use village_coordinator::VillageCoordinator;

pub use kage_domain;
