//! Ninja Service - Enlisting, profile edits and retirement
//!
//! Three ways in: self sign-up (`register`), enlisting by a leader
//! (`create`) and `bootstrap`, which seeds the very first ninja of an empty
//! roster. After that a ninja edits their own profile with `update_self`,
//! and leaders edit anyone with `update_as_leader`.

use std::sync::Arc;

use kage_domain::{
    CredentialHasher, MissionRepository, Ninja, NinjaCriteria, NinjaId, NinjaOnboarded,
    NinjaRepository, Notifier, Rank, Recipient, RoleTag, UnitOfWork, Village, VillageId,
    VillageRepository,
};
use rbac::AccessPolicy;
use shared::{KageError, Result};
use tracing::{debug, info};

use crate::detail::NinjaDetail;
use crate::request::{
    CreateNinjaRequest, LeaderUpdateRequest, RegisterNinjaRequest, SelfUpdateRequest,
};
use crate::transaction;

pub struct NinjaService<N, M, V, W> {
    ninjas: N,
    missions: M,
    villages: V,
    uow: W,
    policy: AccessPolicy,
    hasher: Arc<dyn CredentialHasher>,
    notifier: Arc<dyn Notifier>,
}

impl<N, M, V, W> NinjaService<N, M, V, W>
where
    N: NinjaRepository,
    M: MissionRepository,
    V: VillageRepository,
    W: UnitOfWork,
{
    pub fn new(
        ninjas: N,
        missions: M,
        villages: V,
        uow: W,
        policy: AccessPolicy,
        hasher: Arc<dyn CredentialHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            ninjas,
            missions,
            villages,
            uow,
            policy,
            hasher,
            notifier,
        }
    }

    // ========== Queries ==========

    /// One ninja with their village and missions (leaders, or the ninja themself)
    pub fn get(&self, actor: &Ninja, id: NinjaId) -> Result<NinjaDetail> {
        self.policy.authorize_ninja_access(actor, id)?;
        let ninja = self.find(id)?;
        self.detail(ninja)
    }

    /// Leaders only; everyone else is refused rather than shown themself
    pub fn list(&self, actor: &Ninja, criteria: NinjaCriteria) -> Result<Vec<Ninja>> {
        self.policy.authorize_ninja_list(actor)?;
        let filter = criteria.to_filter();
        debug!(actor = %actor.id(), criteria = filter.len(), "listing ninjas");
        Ok(self.ninjas.find_matching(&filter)?)
    }

    // ========== Enlisting ==========

    /// Self sign-up: a GENIN ninja user, not elite
    pub fn register(&mut self, request: RegisterNinjaRequest) -> Result<NinjaDetail> {
        let enlistment = Enlistment {
            name: request.name,
            email: request.email,
            password: request.password,
            rank: Rank::Genin,
            elite: false,
            roles: vec![RoleTag::NinjaUser],
            village_id: request.village_id,
        };

        self.uow.begin()?;
        let outcome = self.enlist(enlistment);
        let detail = transaction::finish(&self.uow, outcome)?;

        info!(ninja = %detail.ninja.id(), email = detail.ninja.email(), "ninja registered");
        self.welcome(&detail);
        Ok(detail)
    }

    /// Enlisting by a leader, with rank, roles and elite flag chosen up front
    pub fn create(&mut self, actor: &Ninja, request: CreateNinjaRequest) -> Result<NinjaDetail> {
        self.policy.require_elevated(actor, "enlist ninjas")?;

        self.uow.begin()?;
        let outcome = self.enlist(Enlistment::from(request));
        let detail = transaction::finish(&self.uow, outcome)?;

        info!(
            ninja = %detail.ninja.id(),
            actor = %actor.id(),
            rank = %detail.ninja.rank(),
            "ninja enlisted"
        );
        self.welcome(&detail);
        Ok(detail)
    }

    /// First ninja of an empty roster; refused once anyone exists
    pub fn bootstrap(&mut self, request: CreateNinjaRequest) -> Result<NinjaDetail> {
        self.uow.begin()?;
        let outcome = self.enlist_first(request);
        let detail = transaction::finish(&self.uow, outcome)?;

        info!(ninja = %detail.ninja.id(), email = detail.ninja.email(), "roster bootstrapped");
        self.welcome(&detail);
        Ok(detail)
    }

    // ========== Updates ==========

    /// Name, email and password; only the ninja themself
    pub fn update_self(
        &mut self,
        actor: &Ninja,
        id: NinjaId,
        request: SelfUpdateRequest,
    ) -> Result<NinjaDetail> {
        self.policy.authorize_ninja_owner(actor, id)?;

        self.uow.begin()?;
        let outcome = self.amend_profile(id, request);
        let ninja = transaction::finish(&self.uow, outcome)?;

        info!(ninja = %id, "ninja updated own profile");
        self.detail(ninja)
    }

    /// Anything but the password; leaders only
    pub fn update_as_leader(
        &mut self,
        actor: &Ninja,
        id: NinjaId,
        request: LeaderUpdateRequest,
    ) -> Result<NinjaDetail> {
        self.policy.require_elevated(actor, "update other ninjas")?;

        self.uow.begin()?;
        let outcome = self.amend_record(id, request);
        let ninja = transaction::finish(&self.uow, outcome)?;

        info!(ninja = %id, actor = %actor.id(), rank = %ninja.rank(), "ninja updated by leader");
        self.detail(ninja)
    }

    /// Remove a ninja and take them off every mission
    ///
    /// A sitting Kage has to be replaced first.
    pub fn delete(&mut self, actor: &Ninja, id: NinjaId) -> Result<()> {
        self.policy.authorize_ninja_access(actor, id)?;

        self.uow.begin()?;
        let outcome = self.retire(id);
        let unassigned = transaction::finish(&self.uow, outcome)?;

        info!(ninja = %id, actor = %actor.id(), unassigned, "ninja deleted");
        Ok(())
    }

    // ========== Steps ==========

    fn enlist_first(&mut self, request: CreateNinjaRequest) -> Result<NinjaDetail> {
        if self.ninjas.count()? > 0 {
            return Err(KageError::conflict(
                "Bootstrap is only allowed on an empty roster.",
            ));
        }
        self.enlist(Enlistment::from(request))
    }

    fn enlist(&mut self, enlistment: Enlistment) -> Result<NinjaDetail> {
        self.ensure_email_free(&enlistment.email, None)?;
        let village = enlistment
            .village_id
            .map(|id| self.find_village(id))
            .transpose()?;

        let id = self.ninjas.next_id()?;
        let ninja = Ninja::new(
            id,
            enlistment.name,
            enlistment.email,
            self.hasher.hash(&enlistment.password),
        )
        .with_rank(enlistment.rank)
        .with_elite(enlistment.elite)
        .with_roles(enlistment.roles)
        .with_village(village.as_ref().map(Village::id));
        self.ninjas.save(&ninja)?;

        Ok(NinjaDetail {
            ninja,
            village,
            missions: Vec::new(),
        })
    }

    fn amend_profile(&mut self, id: NinjaId, request: SelfUpdateRequest) -> Result<Ninja> {
        let mut ninja = self.find(id)?;

        if let Some(name) = request.name {
            ninja.rename(name);
        }
        if let Some(email) = request.email {
            self.ensure_email_free(&email, Some(id))?;
            ninja.change_email(email);
        }
        if let Some(password) = request.password {
            ninja.change_credential(self.hasher.hash(&password));
        }

        self.ninjas.save(&ninja)?;
        Ok(ninja)
    }

    fn amend_record(&mut self, id: NinjaId, request: LeaderUpdateRequest) -> Result<Ninja> {
        let mut ninja = self.find(id)?;

        if let Some(name) = request.name {
            ninja.rename(name);
        }
        if let Some(email) = request.email {
            self.ensure_email_free(&email, Some(id))?;
            ninja.change_email(email);
        }
        if let Some(rank) = request.rank {
            if !rank.is_high_risk_eligible() {
                self.ensure_not_sole_senior(&ninja)?;
            }
            ninja.promote(rank);
        }
        if let Some(village_id) = request.village_id {
            let village = self.find_village(village_id)?;
            ninja.join_village(village.id());
        }
        if let Some(elite) = request.elite {
            ninja.set_elite(elite);
        }
        if let Some(roles) = request.roles {
            if !ninja.set_roles(roles) {
                return Err(KageError::Validation(vec![
                    "At least one role is required".to_string(),
                ]));
            }
        }

        self.ninjas.save(&ninja)?;
        Ok(ninja)
    }

    fn retire(&mut self, id: NinjaId) -> Result<usize> {
        let ninja = self.find(id)?;

        if let Some(village) = self.villages.find_by_kage(ninja.id())? {
            return Err(KageError::conflict(format!(
                "Ninja with ID {} is the Kage of {}; appoint a new Kage first.",
                ninja.id(),
                village.name()
            )));
        }

        self.ensure_not_sole_senior(&ninja)?;

        let mut missions = self.missions.find_assigned_to(ninja.id())?;
        for mission in &mut missions {
            mission.unassign(ninja.id());
            self.missions.save(mission)?;
        }
        self.ninjas.delete(ninja.id())?;

        Ok(missions.len())
    }

    // ========== Helpers ==========

    fn ensure_email_free(&self, email: &str, owner: Option<NinjaId>) -> Result<()> {
        match self.ninjas.find_by_email(email)? {
            Some(existing) if Some(existing.id()) != owner => Err(KageError::conflict(format!(
                "Email is already registered: {}",
                email
            ))),
            _ => Ok(()),
        }
    }

    /// Refuse when `ninja` is the only Jonin or higher on a high-rank mission
    fn ensure_not_sole_senior(&self, ninja: &Ninja) -> Result<()> {
        if !ninja.rank().is_high_risk_eligible() {
            return Ok(());
        }

        for mission in self.missions.find_assigned_to(ninja.id())? {
            if !mission.difficulty().is_high_risk() {
                continue;
            }
            let mut others = Vec::new();
            for id in mission.assignees().iter().filter(|id| **id != ninja.id()) {
                if let Some(teammate) = self.ninjas.find_by_id(*id)? {
                    others.push(teammate.rank());
                }
            }
            if !mission.difficulty().is_staffed_by(others) {
                return Err(KageError::conflict(format!(
                    "Ninja with ID {} is the only Jonin or higher-rank ninja on mission '{}'.",
                    ninja.id(),
                    mission.title()
                )));
            }
        }
        Ok(())
    }

    fn find(&self, id: NinjaId) -> Result<Ninja> {
        self.ninjas
            .find_by_id(id)?
            .ok_or_else(|| KageError::not_found("Ninja", id))
    }

    fn find_village(&self, id: VillageId) -> Result<Village> {
        self.villages
            .find_by_id(id)?
            .ok_or_else(|| KageError::not_found("Village", id))
    }

    fn detail(&self, ninja: Ninja) -> Result<NinjaDetail> {
        let village = match ninja.village() {
            Some(id) => self.villages.find_by_id(id)?,
            None => None,
        };
        let missions = self.missions.find_assigned_to(ninja.id())?;
        Ok(NinjaDetail {
            ninja,
            village,
            missions,
        })
    }

    fn welcome(&self, detail: &NinjaDetail) {
        self.notifier.ninja_onboarded(&NinjaOnboarded {
            recipient: Recipient::new(detail.ninja.name(), detail.ninja.email()),
            village: detail.village.as_ref().map(|v| v.name().to_string()),
        });
    }
}

/// Everything needed to put a new ninja on the roster
struct Enlistment {
    name: String,
    email: String,
    password: String,
    rank: Rank,
    elite: bool,
    roles: Vec<RoleTag>,
    village_id: Option<VillageId>,
}

impl From<CreateNinjaRequest> for Enlistment {
    fn from(request: CreateNinjaRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            rank: request.rank,
            elite: request.elite,
            roles: request.roles.into_iter().collect(),
            village_id: request.village_id,
        }
    }
}
