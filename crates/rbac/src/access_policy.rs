//! AccessPolicy - Who may read or change what
//!
//! Every "leader-only" gate in Kage goes through `has_elevated_role`, so
//! changing which tag is elevated is a one-line configuration change.

use kage_domain::{Mission, MissionCriteria, Ninja, NinjaId, RoleTag};
use shared::{DenialReason, KageError, Result};
use tracing::{debug, warn};

use crate::update_scope::{AssigneeScope, LeaderScope, MissionUpdateScope};

/// Access policy keyed on a single elevated role tag
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    elevated: RoleTag,
}

impl AccessPolicy {
    /// Create a policy treating `elevated` as the leader-class tag
    pub fn new(elevated: RoleTag) -> Self {
        Self { elevated }
    }

    /// The leader-class tag
    pub fn elevated_role(&self) -> RoleTag {
        self.elevated
    }

    /// Check if the actor carries the elevated tag
    pub fn has_elevated_role(&self, actor: &Ninja) -> bool {
        actor.has_role(self.elevated)
    }

    /// Check if the actor is on the mission's team
    pub fn is_assignee(actor: &Ninja, mission: &Mission) -> bool {
        mission.is_assigned(actor.id())
    }

    /// Gate for leader-only operations
    pub fn require_elevated(&self, actor: &Ninja, action: &str) -> Result<()> {
        if self.has_elevated_role(actor) {
            return Ok(());
        }
        Err(self.deny(
            actor,
            DenialReason::MissingRole,
            format!("Only a Kage can {}.", action),
        ))
    }

    /// Single-mission read: elevated or assigned
    pub fn authorize_mission_read(&self, actor: &Ninja, mission: &Mission) -> Result<()> {
        if self.has_elevated_role(actor) || Self::is_assignee(actor, mission) {
            return Ok(());
        }
        Err(self.deny(
            actor,
            DenialReason::NotAssignee,
            "You do not have permission to view this mission.",
        ))
    }

    /// Single-ninja read (and removal): elevated or the ninja themself
    pub fn authorize_ninja_access(&self, actor: &Ninja, target: NinjaId) -> Result<()> {
        if self.has_elevated_role(actor) || actor.id() == target {
            return Ok(());
        }
        Err(self.deny(
            actor,
            DenialReason::NotOwner,
            "You are not authorized to access this ninja's data.",
        ))
    }

    /// Self-service edits: the ninja themself, nobody else
    pub fn authorize_ninja_owner(&self, actor: &Ninja, target: NinjaId) -> Result<()> {
        if actor.id() == target {
            return Ok(());
        }
        Err(self.deny(
            actor,
            DenialReason::NotOwner,
            "You are not authorized to update this ninja's data.",
        ))
    }

    /// Ninja lists are for elevated actors only; there is no self-only mode
    pub fn authorize_ninja_list(&self, actor: &Ninja) -> Result<()> {
        self.require_elevated(actor, "list ninjas")
    }

    /// Narrow mission list criteria to what the actor may see
    ///
    /// Elevated actors keep their criteria. Everyone else only ever sees
    /// their own missions, whatever `assigned_to` they asked for.
    pub fn scope_mission_list(&self, actor: &Ninja, criteria: MissionCriteria) -> MissionCriteria {
        if self.has_elevated_role(actor) {
            return criteria;
        }
        if criteria.assigned_to.is_some_and(|id| id != actor.id()) {
            debug!(
                actor = %actor.id(),
                "ignoring assignee filter from non-elevated actor"
            );
        }
        MissionCriteria {
            assigned_to: Some(actor.id()),
            ..criteria
        }
    }

    /// Pick the update contract for this actor on this mission
    pub fn select_update_scope(
        &self,
        actor: &Ninja,
        mission: &Mission,
    ) -> Result<Box<dyn MissionUpdateScope>> {
        if self.has_elevated_role(actor) {
            return Ok(Box::new(LeaderScope));
        }
        if Self::is_assignee(actor, mission) {
            return Ok(Box::new(AssigneeScope));
        }
        Err(self.deny(
            actor,
            DenialReason::NotAssignee,
            "You do not have permission to update this mission.",
        ))
    }

    fn deny(&self, actor: &Ninja, reason: DenialReason, message: impl Into<String>) -> KageError {
        let error = KageError::denied(reason, message);
        warn!(actor = %actor.id(), ?reason, "access denied: {}", error);
        error
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(RoleTag::Kage)
    }
}
