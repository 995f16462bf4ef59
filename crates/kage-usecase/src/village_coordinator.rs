//! Village Coordinator
//!
//! Keeps village names unique (ignoring case) and every Kage on exactly one
//! village. Dissolving a village leaves its ninjas unaffiliated.

use kage_domain::model::village::same_village_name;
use kage_domain::{
    Ninja, NinjaId, NinjaRepository, UnitOfWork, Village, VillageCriteria, VillageId,
    VillageListing, VillageRepository,
};
use rbac::AccessPolicy;
use shared::{KageError, Result};
use tracing::info;

use crate::request::{CreateVillageRequest, UpdateVillageRequest};
use crate::transaction;

pub struct VillageCoordinator<V, N, W> {
    villages: V,
    ninjas: N,
    uow: W,
    policy: AccessPolicy,
}

impl<V, N, W> VillageCoordinator<V, N, W>
where
    V: VillageRepository,
    N: NinjaRepository,
    W: UnitOfWork,
{
    pub fn new(villages: V, ninjas: N, uow: W, policy: AccessPolicy) -> Self {
        Self {
            villages,
            ninjas,
            uow,
            policy,
        }
    }

    pub fn get(&self, id: VillageId) -> Result<VillageListing> {
        let village = self.find(id)?;
        self.listing(village)
    }

    /// Villages with their Kage, narrowed by `criteria`
    pub fn list(&self, criteria: VillageCriteria) -> Result<Vec<VillageListing>> {
        let listings = self
            .villages
            .find_all()?
            .into_iter()
            .map(|village| self.listing(village))
            .collect::<Result<Vec<_>>>()?;
        Ok(criteria.to_filter().apply(listings))
    }

    pub fn create(&mut self, actor: &Ninja, request: CreateVillageRequest) -> Result<VillageListing> {
        self.policy.require_elevated(actor, "manage villages")?;

        self.uow.begin()?;
        let outcome = self.found(request);
        let listing = transaction::finish(&self.uow, outcome)?;

        info!(
            village = %listing.village.id(),
            name = listing.village.name(),
            kage = %listing.kage.id(),
            "village created"
        );
        Ok(listing)
    }

    /// Rename and/or appoint a new Kage; omitted fields stay as they are
    pub fn update(
        &mut self,
        actor: &Ninja,
        id: VillageId,
        request: UpdateVillageRequest,
    ) -> Result<VillageListing> {
        self.policy.require_elevated(actor, "manage villages")?;

        self.uow.begin()?;
        let outcome = self.amend(id, request);
        let listing = transaction::finish(&self.uow, outcome)?;

        info!(
            village = %id,
            name = listing.village.name(),
            kage = %listing.kage.id(),
            "village updated"
        );
        Ok(listing)
    }

    /// Remove a village; its ninjas stay, without a village
    pub fn delete(&mut self, actor: &Ninja, id: VillageId) -> Result<()> {
        self.policy.require_elevated(actor, "manage villages")?;

        self.uow.begin()?;
        let outcome = self.dissolve(id);
        let rehomed = transaction::finish(&self.uow, outcome)?;

        info!(village = %id, rehomed, "village dissolved");
        Ok(())
    }

    // ========== Steps ==========

    fn found(&mut self, request: CreateVillageRequest) -> Result<VillageListing> {
        let kage = self.find_ninja(request.kage_id)?;

        if self.villages.exists_by_name_ignore_case(&request.name)? {
            return Err(name_taken(&request.name));
        }
        self.ensure_free_kage(kage.id(), None)?;

        let id = self.villages.next_id()?;
        let village = Village::new(id, request.name, kage.id());
        self.villages.save(&village)?;

        Ok(VillageListing { village, kage })
    }

    fn amend(&mut self, id: VillageId, request: UpdateVillageRequest) -> Result<VillageListing> {
        let mut village = self.find(id)?;

        if let Some(name) = request.name {
            if !same_village_name(village.name(), &name)
                && self.villages.exists_by_name_ignore_case(&name)?
            {
                return Err(name_taken(&name));
            }
            village.rename(name);
        }

        if let Some(kage_id) = request.kage_id {
            let kage = self.find_ninja(kage_id)?;
            self.ensure_free_kage(kage.id(), Some(id))?;
            village.appoint_kage(kage.id());
        }

        self.villages.save(&village)?;
        self.listing(village)
    }

    fn dissolve(&mut self, id: VillageId) -> Result<usize> {
        let village = self.find(id)?;

        let mut members = self.ninjas.find_by_village(village.id())?;
        for ninja in &mut members {
            ninja.leave_village();
        }
        self.ninjas.save_all(&members)?;
        self.villages.delete(village.id())?;

        Ok(members.len())
    }

    // ========== Helpers ==========

    fn ensure_free_kage(&self, kage: NinjaId, exempt: Option<VillageId>) -> Result<()> {
        if self.villages.exists_by_kage_excluding(kage, exempt)? {
            return Err(KageError::conflict(format!(
                "Ninja with ID {} is already the Kage of another village.",
                kage
            )));
        }
        Ok(())
    }

    fn find(&self, id: VillageId) -> Result<Village> {
        self.villages
            .find_by_id(id)?
            .ok_or_else(|| KageError::not_found("Village", id))
    }

    fn find_ninja(&self, id: NinjaId) -> Result<Ninja> {
        self.ninjas
            .find_by_id(id)?
            .ok_or_else(|| KageError::not_found("Ninja", id))
    }

    fn listing(&self, village: Village) -> Result<VillageListing> {
        let kage = self.find_ninja(village.kage())?;
        Ok(VillageListing { village, kage })
    }
}

fn name_taken(name: &str) -> KageError {
    KageError::conflict(format!("Village with this name already exists: {}", name))
}
