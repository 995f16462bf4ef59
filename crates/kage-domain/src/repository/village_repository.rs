//! Village Repository - Abstract persistence for Villages

use crate::model::ninja::NinjaId;
use crate::model::village::{Village, VillageId};
use crate::repository::RepositoryError;

/// Village Repository Trait
///
/// This is a PORT in hexagonal architecture.
pub trait VillageRepository {
    /// Reserve an identity for a new village
    fn next_id(&mut self) -> Result<VillageId, RepositoryError>;

    /// Save a village (create or update)
    fn save(&mut self, village: &Village) -> Result<(), RepositoryError>;

    /// Find a village by ID
    fn find_by_id(&self, id: VillageId) -> Result<Option<Village>, RepositoryError>;

    /// Find a village by name, ignoring case
    fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Village>, RepositoryError> {
        Ok(self.find_all()?.into_iter().find(|v| v.is_named(name)))
    }

    /// Whether a village with this name exists, ignoring case
    fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_name_ignore_case(name)?.is_some())
    }

    /// The village led by this ninja, if any
    fn find_by_kage(&self, kage: NinjaId) -> Result<Option<Village>, RepositoryError> {
        Ok(self.find_all()?.into_iter().find(|v| v.kage() == kage))
    }

    /// Whether this ninja leads some village other than `excluded`
    fn exists_by_kage_excluding(
        &self,
        kage: NinjaId,
        excluded: Option<VillageId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .find_all()?
            .iter()
            .any(|v| v.kage() == kage && Some(v.id()) != excluded))
    }

    /// All villages, ordered by ID
    fn find_all(&self) -> Result<Vec<Village>, RepositoryError>;

    /// Delete a village
    fn delete(&mut self, id: VillageId) -> Result<(), RepositoryError>;

    /// Count all villages
    fn count(&self) -> Result<usize, RepositoryError>;
}
