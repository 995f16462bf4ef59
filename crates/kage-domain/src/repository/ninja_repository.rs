//! Ninja Repository - Abstract persistence for Ninjas
//!
//! Ninjas are looked up by ID, by email (the login principal) or by
//! village membership.

use crate::filter::Filter;
use crate::model::ninja::{Ninja, NinjaId};
use crate::model::village::VillageId;
use crate::repository::RepositoryError;

/// Ninja Repository Trait
///
/// This is a PORT in hexagonal architecture.
pub trait NinjaRepository {
    /// Reserve an identity for a new ninja
    fn next_id(&mut self) -> Result<NinjaId, RepositoryError>;

    /// Save a ninja (create or update)
    fn save(&mut self, ninja: &Ninja) -> Result<(), RepositoryError>;

    /// Save several ninjas
    fn save_all(&mut self, ninjas: &[Ninja]) -> Result<(), RepositoryError> {
        for ninja in ninjas {
            self.save(ninja)?;
        }
        Ok(())
    }

    /// Find a ninja by ID
    fn find_by_id(&self, id: NinjaId) -> Result<Option<Ninja>, RepositoryError>;

    /// Find a ninja by email (exact match)
    fn find_by_email(&self, email: &str) -> Result<Option<Ninja>, RepositoryError>;

    /// Whether any ninja uses this email
    fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.find_by_email(email)?.is_some())
    }

    /// All ninjas, ordered by ID
    fn find_all(&self) -> Result<Vec<Ninja>, RepositoryError>;

    /// Ninjas matching a filter, ordered by ID
    fn find_matching(&self, filter: &Filter<Ninja>) -> Result<Vec<Ninja>, RepositoryError> {
        Ok(filter.apply(self.find_all()?))
    }

    /// Members of a village
    fn find_by_village(&self, village: VillageId) -> Result<Vec<Ninja>, RepositoryError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|n| n.village() == Some(village))
            .collect())
    }

    /// Delete a ninja
    fn delete(&mut self, id: NinjaId) -> Result<(), RepositoryError>;

    /// Count all ninjas
    fn count(&self) -> Result<usize, RepositoryError>;
}
