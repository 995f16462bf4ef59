//! Response shapes
//!
//! Everything a caller sees, serialized in camelCase. Credential hashes never
//! leave the engine.

use chrono::{DateTime, Utc};
use kage_domain::{Mission, Ninja, Timestamp, Village, VillageListing};
use kage_usecase::{MissionDetail, NinjaDetail};
use serde::Serialize;
use shared::{ErrorKind, KageError};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NinjaSummary {
    pub id: u64,
    pub name: String,
    pub rank: String,
}

impl From<&Ninja> for NinjaSummary {
    fn from(ninja: &Ninja) -> Self {
        Self {
            id: ninja.id().value(),
            name: ninja.name().to_string(),
            rank: ninja.rank().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub id: u64,
    pub title: String,
    pub difficulty: String,
    pub status: String,
}

impl From<&Mission> for MissionSummary {
    fn from(mission: &Mission) -> Self {
        Self {
            id: mission.id().value(),
            title: mission.title().to_string(),
            difficulty: mission.difficulty().to_string(),
            status: mission.status().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResponse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub reward: u32,
    pub difficulty: String,
    pub status: String,
    pub creation_date: String,
    pub assigned_ninjas: Vec<NinjaSummary>,
}

impl From<&MissionDetail> for MissionResponse {
    fn from(detail: &MissionDetail) -> Self {
        let mission = &detail.mission;
        Self {
            id: mission.id().value(),
            title: mission.title().to_string(),
            description: mission.description().to_string(),
            reward: mission.reward(),
            difficulty: mission.difficulty().to_string(),
            status: mission.status().to_string(),
            creation_date: rfc3339(mission.created_at()),
            assigned_ninjas: detail.assignees.iter().map(NinjaSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageSummary {
    pub id: u64,
    pub name: String,
}

impl From<&Village> for VillageSummary {
    fn from(village: &Village) -> Self {
        Self {
            id: village.id().value(),
            name: village.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageResponse {
    pub id: u64,
    pub name: String,
    pub kage: NinjaSummary,
}

impl From<&VillageListing> for VillageResponse {
    fn from(listing: &VillageListing) -> Self {
        Self {
            id: listing.village.id().value(),
            name: listing.village.name().to_string(),
            kage: NinjaSummary::from(&listing.kage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NinjaResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub rank: String,
    pub village: Option<VillageSummary>,
    pub mission_completed_count: u32,
    pub elite: bool,
    pub roles: Vec<String>,
    pub assigned_missions: Vec<MissionSummary>,
}

impl From<&NinjaDetail> for NinjaResponse {
    fn from(detail: &NinjaDetail) -> Self {
        let ninja = &detail.ninja;
        Self {
            id: ninja.id().value(),
            name: ninja.name().to_string(),
            email: ninja.email().to_string(),
            rank: ninja.rank().to_string(),
            village: detail.village.as_ref().map(VillageSummary::from),
            mission_completed_count: ninja.missions_completed(),
            elite: ninja.is_elite(),
            roles: ninja.roles().iter().map(|r| r.as_str().to_string()).collect(),
            assigned_missions: detail.missions.iter().map(MissionSummary::from).collect(),
        }
    }
}

/// Error body with a fixed status per error kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn status_for(kind: ErrorKind) -> (u16, &'static str) {
        match kind {
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::AccessDenied => (403, "Forbidden"),
            ErrorKind::Validation => (400, "Bad Request"),
            ErrorKind::Unauthenticated => (401, "Unauthorized"),
            ErrorKind::Internal => (500, "Internal Server Error"),
        }
    }
}

impl From<KageError> for ErrorResponse {
    fn from(err: KageError) -> Self {
        let kind = err.kind();
        let (status, reason) = Self::status_for(kind);

        // Internal details stay in the log
        let message = if kind == ErrorKind::Internal {
            error!(error = %err, "request failed");
            "An unexpected error occurred".to_string()
        } else {
            debug!(status, error = %err, "request rejected");
            err.to_string()
        };

        Self {
            status,
            error: reason.to_string(),
            message,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Empty (and logged) when the timestamp is outside chrono's range
fn rfc3339(at: Timestamp) -> String {
    match DateTime::<Utc>::from_timestamp_millis(at.as_unix_millis()) {
        Some(dt) => dt.to_rfc3339(),
        None => {
            warn!(millis = at.as_unix_millis(), "timestamp out of range");
            String::new()
        }
    }
}
