//! Engine results with their related records resolved

use kage_domain::{Mission, Ninja, Village};

/// A mission together with its assigned ninjas
#[derive(Debug, Clone)]
pub struct MissionDetail {
    pub mission: Mission,
    /// In id order
    pub assignees: Vec<Ninja>,
}

/// A ninja together with its village and missions
#[derive(Debug, Clone)]
pub struct NinjaDetail {
    pub ninja: Ninja,
    pub village: Option<Village>,
    pub missions: Vec<Mission>,
}
