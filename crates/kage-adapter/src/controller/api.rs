//! KageApi - Inbound adapter over the in-memory store
//!
//! Every call follows the same path:
//! 1. Authenticate the principal (the caller's email)
//! 2. Validate the request shape
//! 3. Run the engine
//! 4. Map the result, or the error, to a response shape

use std::sync::Arc;

use kage_domain::{
    Clock, CredentialHasher, MissionCriteria, MissionId, Ninja, NinjaCriteria, NinjaId, Notifier,
    VillageCriteria, VillageId,
};
use kage_usecase::{
    Authenticator, CreateMissionRequest, CreateNinjaRequest, CreateVillageRequest,
    LeaderUpdateRequest, MissionService, NinjaService, RegisterNinjaRequest, SelfUpdateRequest,
    UpdateMissionRequest, UpdateVillageRequest, Validate, VillageCoordinator,
};
use rbac::AccessPolicy;

use crate::controller::response::{
    ErrorResponse, MissionResponse, MissionSummary, NinjaResponse, NinjaSummary, VillageResponse,
};
use crate::repository::{
    InMemoryMissionRepository, InMemoryNinjaRepository, InMemoryStore, InMemoryUnitOfWork,
    InMemoryVillageRepository,
};

pub type ApiResult<T> = std::result::Result<T, ErrorResponse>;

type Missions = MissionService<InMemoryMissionRepository, InMemoryNinjaRepository, InMemoryUnitOfWork>;
type Ninjas = NinjaService<
    InMemoryNinjaRepository,
    InMemoryMissionRepository,
    InMemoryVillageRepository,
    InMemoryUnitOfWork,
>;
type Villages =
    VillageCoordinator<InMemoryVillageRepository, InMemoryNinjaRepository, InMemoryUnitOfWork>;

/// Outbound collaborators shared by every engine
#[derive(Clone)]
pub struct Gateways {
    pub clock: Arc<dyn Clock>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct KageApi {
    auth: Authenticator<InMemoryNinjaRepository>,
    missions: Missions,
    ninjas: Ninjas,
    villages: Villages,
}

impl KageApi {
    pub fn new(store: &InMemoryStore, policy: AccessPolicy, gateways: Gateways) -> Self {
        Self {
            auth: Authenticator::new(store.ninjas(), gateways.hasher.clone()),
            missions: MissionService::new(
                store.missions(),
                store.ninjas(),
                store.unit_of_work(),
                policy,
                gateways.clock,
                gateways.notifier.clone(),
            ),
            ninjas: NinjaService::new(
                store.ninjas(),
                store.missions(),
                store.villages(),
                store.unit_of_work(),
                policy,
                gateways.hasher,
                gateways.notifier,
            ),
            villages: VillageCoordinator::new(
                store.villages(),
                store.ninjas(),
                store.unit_of_work(),
                policy,
            ),
        }
    }

    fn actor(&self, principal: &str) -> ApiResult<Ninja> {
        Ok(self.auth.authenticate(principal)?)
    }

    // ========== Auth ==========

    pub fn login(&self, email: &str, password: &str) -> ApiResult<NinjaResponse> {
        let ninja = self.auth.login(email, password)?;
        let detail = self.ninjas.get(&ninja, ninja.id())?;
        Ok(NinjaResponse::from(&detail))
    }

    pub fn register(&mut self, request: RegisterNinjaRequest) -> ApiResult<NinjaResponse> {
        request.validate()?;
        let detail = self.ninjas.register(request)?;
        Ok(NinjaResponse::from(&detail))
    }

    /// Seed the first ninja of an empty store
    pub fn bootstrap(&mut self, request: CreateNinjaRequest) -> ApiResult<NinjaResponse> {
        request.validate()?;
        let detail = self.ninjas.bootstrap(request)?;
        Ok(NinjaResponse::from(&detail))
    }

    // ========== Missions ==========

    pub fn list_missions(
        &self,
        principal: &str,
        criteria: MissionCriteria,
    ) -> ApiResult<Vec<MissionSummary>> {
        let actor = self.actor(principal)?;
        let missions = self.missions.list(&actor, criteria)?;
        Ok(missions.iter().map(MissionSummary::from).collect())
    }

    pub fn get_mission(&self, principal: &str, id: MissionId) -> ApiResult<MissionResponse> {
        let actor = self.actor(principal)?;
        let detail = self.missions.get(&actor, id)?;
        Ok(MissionResponse::from(&detail))
    }

    pub fn create_mission(
        &mut self,
        principal: &str,
        request: CreateMissionRequest,
    ) -> ApiResult<MissionResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let detail = self.missions.create(&actor, request)?;
        Ok(MissionResponse::from(&detail))
    }

    pub fn update_mission(
        &mut self,
        principal: &str,
        id: MissionId,
        request: UpdateMissionRequest,
    ) -> ApiResult<MissionResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let detail = self.missions.update(&actor, id, request)?;
        Ok(MissionResponse::from(&detail))
    }

    pub fn delete_mission(&mut self, principal: &str, id: MissionId) -> ApiResult<()> {
        let actor = self.actor(principal)?;
        self.missions.delete(&actor, id)?;
        Ok(())
    }

    // ========== Ninjas ==========

    pub fn list_ninjas(
        &self,
        principal: &str,
        criteria: NinjaCriteria,
    ) -> ApiResult<Vec<NinjaSummary>> {
        let actor = self.actor(principal)?;
        let ninjas = self.ninjas.list(&actor, criteria)?;
        Ok(ninjas.iter().map(NinjaSummary::from).collect())
    }

    pub fn get_ninja(&self, principal: &str, id: NinjaId) -> ApiResult<NinjaResponse> {
        let actor = self.actor(principal)?;
        let detail = self.ninjas.get(&actor, id)?;
        Ok(NinjaResponse::from(&detail))
    }

    pub fn create_ninja(
        &mut self,
        principal: &str,
        request: CreateNinjaRequest,
    ) -> ApiResult<NinjaResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let detail = self.ninjas.create(&actor, request)?;
        Ok(NinjaResponse::from(&detail))
    }

    pub fn update_own_profile(
        &mut self,
        principal: &str,
        id: NinjaId,
        request: SelfUpdateRequest,
    ) -> ApiResult<NinjaResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let detail = self.ninjas.update_self(&actor, id, request)?;
        Ok(NinjaResponse::from(&detail))
    }

    pub fn update_ninja(
        &mut self,
        principal: &str,
        id: NinjaId,
        request: LeaderUpdateRequest,
    ) -> ApiResult<NinjaResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let detail = self.ninjas.update_as_leader(&actor, id, request)?;
        Ok(NinjaResponse::from(&detail))
    }

    pub fn delete_ninja(&mut self, principal: &str, id: NinjaId) -> ApiResult<()> {
        let actor = self.actor(principal)?;
        self.ninjas.delete(&actor, id)?;
        Ok(())
    }

    // ========== Villages ==========

    pub fn list_villages(
        &self,
        principal: &str,
        criteria: VillageCriteria,
    ) -> ApiResult<Vec<VillageResponse>> {
        self.actor(principal)?;
        let listings = self.villages.list(criteria)?;
        Ok(listings.iter().map(VillageResponse::from).collect())
    }

    pub fn get_village(&self, principal: &str, id: VillageId) -> ApiResult<VillageResponse> {
        self.actor(principal)?;
        let listing = self.villages.get(id)?;
        Ok(VillageResponse::from(&listing))
    }

    pub fn create_village(
        &mut self,
        principal: &str,
        request: CreateVillageRequest,
    ) -> ApiResult<VillageResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let listing = self.villages.create(&actor, request)?;
        Ok(VillageResponse::from(&listing))
    }

    pub fn update_village(
        &mut self,
        principal: &str,
        id: VillageId,
        request: UpdateVillageRequest,
    ) -> ApiResult<VillageResponse> {
        let actor = self.actor(principal)?;
        request.validate()?;
        let listing = self.villages.update(&actor, id, request)?;
        Ok(VillageResponse::from(&listing))
    }

    pub fn delete_village(&mut self, principal: &str, id: VillageId) -> ApiResult<()> {
        let actor = self.actor(principal)?;
        self.villages.delete(&actor, id)?;
        Ok(())
    }
}
