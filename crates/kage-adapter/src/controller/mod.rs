//! Controller Adapters - The inbound surface

pub mod api;
pub mod response;

pub use api::{ApiResult, Gateways, KageApi};
pub use response::{
    ErrorResponse, MissionResponse, MissionSummary, NinjaResponse, NinjaSummary, VillageResponse,
    VillageSummary,
};
