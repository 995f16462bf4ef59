//! Mission Repository - Abstract persistence for Missions
//!
//! This trait defines what operations the domain needs.
//! How they're implemented (SQL, file, memory) is not our concern here.

use crate::filter::Filter;
use crate::model::mission::{Mission, MissionId};
use crate::model::ninja::NinjaId;
use crate::repository::RepositoryError;

/// Mission Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
///
/// Note: No async here - that's an implementation detail.
/// If you need async, wrap this in an async adapter.
pub trait MissionRepository {
    /// Reserve an identity for a new mission
    fn next_id(&mut self) -> Result<MissionId, RepositoryError>;

    /// Save a mission (create or update)
    fn save(&mut self, mission: &Mission) -> Result<(), RepositoryError>;

    /// Find a mission by ID
    fn find_by_id(&self, id: MissionId) -> Result<Option<Mission>, RepositoryError>;

    /// Whether any mission carries exactly this title (case-sensitive)
    fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError>;

    /// All missions, ordered by ID
    fn find_all(&self) -> Result<Vec<Mission>, RepositoryError>;

    /// Missions matching a filter, ordered by ID
    fn find_matching(&self, filter: &Filter<Mission>) -> Result<Vec<Mission>, RepositoryError> {
        Ok(filter.apply(self.find_all()?))
    }

    /// The ninja side of the assignment relation
    fn find_assigned_to(&self, ninja: NinjaId) -> Result<Vec<Mission>, RepositoryError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|m| m.is_assigned(ninja))
            .collect())
    }

    /// Delete a mission
    fn delete(&mut self, id: MissionId) -> Result<(), RepositoryError>;

    /// Check if a mission exists
    fn exists(&self, id: MissionId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Count all missions
    fn count(&self) -> Result<usize, RepositoryError>;
}
