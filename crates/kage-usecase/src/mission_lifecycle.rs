//! Mission Lifecycle Engine
//!
//! The only place missions are created, changed or removed:
//! 1. Gate: the access policy decides who may act, and with which scope
//! 2. Check: title uniqueness, team resolution, high-risk staffing
//! 3. Apply: one pure merge, the completion side effect, one save
//! 4. Announce: newly assigned ninjas hear about it after the commit
//!
//! Every mutation runs inside one unit of work; a rejected request leaves
//! nothing behind.

use std::collections::BTreeSet;
use std::sync::Arc;

use kage_domain::{
    Clock, Difficulty, Mission, MissionAssigned, MissionCriteria, MissionId, MissionPatch,
    MissionRepository, Ninja, NinjaId, NinjaRepository, Notifier, Recipient, UnitOfWork,
};
use rbac::AccessPolicy;
use shared::{DenialReason, KageError, Result};
use tracing::{debug, info};

use crate::detail::MissionDetail;
use crate::request::{CreateMissionRequest, UpdateMissionRequest};
use crate::transaction;

const HIGH_RISK_MESSAGE: &str =
    "High-rank missions must be assigned to at least one Jonin or higher-rank ninja.";

/// Mission engine over a mission store, a ninja store and a unit of work
pub struct MissionService<M, N, W> {
    missions: M,
    ninjas: N,
    uow: W,
    policy: AccessPolicy,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl<M, N, W> MissionService<M, N, W>
where
    M: MissionRepository,
    N: NinjaRepository,
    W: UnitOfWork,
{
    pub fn new(
        missions: M,
        ninjas: N,
        uow: W,
        policy: AccessPolicy,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            missions,
            ninjas,
            uow,
            policy,
            clock,
            notifier,
        }
    }

    // ========== Queries ==========

    /// Missions visible to the actor, narrowed by `criteria`
    ///
    /// Non-elevated actors only ever see missions they are assigned to.
    pub fn list(&self, actor: &Ninja, criteria: MissionCriteria) -> Result<Vec<Mission>> {
        let criteria = self.policy.scope_mission_list(actor, criteria);
        let filter = criteria.to_filter();
        debug!(actor = %actor.id(), criteria = filter.len(), "listing missions");
        Ok(self.missions.find_matching(&filter)?)
    }

    pub fn get(&self, actor: &Ninja, id: MissionId) -> Result<MissionDetail> {
        let mission = self.find(id)?;
        self.policy.authorize_mission_read(actor, &mission)?;
        let assignees = self.resolve_team(mission.assignees())?;
        Ok(MissionDetail { mission, assignees })
    }

    // ========== Mutations ==========

    /// Create a PENDING mission
    pub fn create(&mut self, actor: &Ninja, request: CreateMissionRequest) -> Result<MissionDetail> {
        self.policy
            .require_elevated(actor, "create or manage missions")?;

        self.uow.begin()?;
        let outcome = self.insert(request);
        let detail = transaction::finish(&self.uow, outcome)?;

        info!(
            mission = %detail.mission.id(),
            title = detail.mission.title(),
            difficulty = %detail.mission.difficulty(),
            team = detail.assignees.len(),
            "mission created"
        );
        self.announce(&detail.mission, &detail.assignees);
        Ok(detail)
    }

    /// Apply a partial update with the scope the policy grants this actor
    pub fn update(
        &mut self,
        actor: &Ninja,
        id: MissionId,
        request: UpdateMissionRequest,
    ) -> Result<MissionDetail> {
        let patch = request.into_patch();

        self.uow.begin()?;
        let outcome = self.apply(actor, id, &patch);
        let (detail, newcomers) = transaction::finish(&self.uow, outcome)?;

        info!(
            mission = %id,
            actor = %actor.id(),
            status = %detail.mission.status(),
            "mission updated"
        );
        if !newcomers.is_empty() {
            self.announce(&detail.mission, &newcomers);
        }
        Ok(detail)
    }

    /// Remove a mission; completion counters are left alone
    pub fn delete(&mut self, actor: &Ninja, id: MissionId) -> Result<()> {
        self.policy
            .require_elevated(actor, "create or manage missions")?;

        self.uow.begin()?;
        let outcome = self.remove(id);
        transaction::finish(&self.uow, outcome)?;

        info!(mission = %id, actor = %actor.id(), "mission deleted");
        Ok(())
    }

    // ========== Steps ==========

    fn insert(&mut self, request: CreateMissionRequest) -> Result<MissionDetail> {
        if self.missions.exists_by_title(&request.title)? {
            return Err(title_taken(&request.title));
        }

        let ids: BTreeSet<NinjaId> = request.assignee_ids.iter().copied().collect();
        let team = self.resolve_team(&ids)?;
        ensure_staffed(request.difficulty, &team)?;

        let id = self.missions.next_id()?;
        let mission = Mission::new(id, request.title, request.difficulty, self.clock.now())
            .with_description(request.description)
            .with_reward(request.reward)
            .with_assignees(ids);
        self.missions.save(&mission)?;

        Ok(MissionDetail {
            mission,
            assignees: team,
        })
    }

    fn apply(
        &mut self,
        actor: &Ninja,
        id: MissionId,
        patch: &MissionPatch,
    ) -> Result<(MissionDetail, Vec<Ninja>)> {
        let current = self.find(id)?;

        let scope = self.policy.select_update_scope(actor, &current)?;
        scope.check(patch)?;
        debug!(mission = %id, scope = scope.name(), "update scope granted");

        if let Some(title) = &patch.title {
            if title != current.title() && self.missions.exists_by_title(title)? {
                return Err(title_taken(title));
            }
        }

        let next = current.merged(patch);
        if scope.requires_staffing_check() {
            let team = self.resolve_team(next.assignees())?;
            ensure_staffed(next.difficulty(), &team)?;
        }

        if let Some(transition) = current.transition_to(patch.status) {
            debug!(mission = %id, from = %transition.from, to = %transition.to, "status change");
            if transition.completes() {
                self.record_completion(&current)?;
            }
        }

        self.missions.save(&next)?;

        let assignees = self.resolve_team(next.assignees())?;
        let newcomers = assignees
            .iter()
            .filter(|n| !current.is_assigned(n.id()))
            .cloned()
            .collect();

        Ok((
            MissionDetail {
                mission: next,
                assignees,
            },
            newcomers,
        ))
    }

    fn remove(&mut self, id: MissionId) -> Result<()> {
        if !self.missions.exists(id)? {
            return Err(KageError::not_found("Mission", id));
        }
        self.missions.delete(id)?;
        Ok(())
    }

    /// Credit everyone assigned at the moment of completion
    fn record_completion(&mut self, mission: &Mission) -> Result<()> {
        let mut team = self.resolve_team(mission.assignees())?;
        for ninja in &mut team {
            ninja.record_completed_mission();
        }
        self.ninjas.save_all(&team)?;
        info!(mission = %mission.id(), credited = team.len(), "mission completed");
        Ok(())
    }

    // ========== Helpers ==========

    fn find(&self, id: MissionId) -> Result<Mission> {
        self.missions
            .find_by_id(id)?
            .ok_or_else(|| KageError::not_found("Mission", id))
    }

    /// Resolve every id; the first unknown id fails the whole team
    fn resolve_team(&self, ids: &BTreeSet<NinjaId>) -> Result<Vec<Ninja>> {
        ids.iter()
            .map(|id| {
                self.ninjas
                    .find_by_id(*id)?
                    .ok_or_else(|| KageError::not_found("Ninja", id))
            })
            .collect()
    }

    fn announce(&self, mission: &Mission, recipients: &[Ninja]) {
        self.notifier.mission_assigned(&MissionAssigned {
            mission_title: mission.title().to_string(),
            mission_description: mission.description().to_string(),
            difficulty: mission.difficulty(),
            team: recipients
                .iter()
                .map(|n| Recipient::new(n.name(), n.email()))
                .collect(),
        });
    }
}

fn ensure_staffed(difficulty: Difficulty, team: &[Ninja]) -> Result<()> {
    if difficulty.is_staffed_by(team.iter().map(Ninja::rank)) {
        return Ok(());
    }
    Err(KageError::denied(
        DenialReason::HighRiskStaffing,
        HIGH_RISK_MESSAGE,
    ))
}

fn title_taken(title: &str) -> KageError {
    KageError::conflict(format!("Mission with title '{}' already exists.", title))
}
