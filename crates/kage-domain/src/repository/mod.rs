//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist data,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait MissionRepo     │  InMemoryMissionRepository
//!   fn save()           │  (PostgresMissionRepository)
//!   fn find_by_id()     │
//! trait UnitOfWork      │  InMemoryStore
//!   fn begin/commit()   │
//! ```

pub mod mission_repository;
pub mod ninja_repository;
pub mod village_repository;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Record not found where one was required
    NotFound { entity: &'static str, id: String },
    /// Failed to persist
    PersistenceError { message: String },
    /// Unit of work misuse (commit without begin, nested begin)
    TransactionError { message: String },
}

impl RepositoryError {
    pub fn persistence(message: impl Into<String>) -> Self {
        RepositoryError::PersistenceError {
            message: message.into(),
        }
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        RepositoryError::TransactionError {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { entity, id } => {
                write!(f, "{} not found: {}", entity, id)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
            RepositoryError::TransactionError { message } => {
                write!(f, "Transaction error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Transaction boundary shared by all repositories of one store
///
/// Every mutating use case runs between `begin` and either `commit` or
/// `rollback`, so the entity write and its cascades (completion counters,
/// village re-homing, assignee removal) land together or not at all.
pub trait UnitOfWork {
    /// Open a unit of work
    fn begin(&self) -> Result<(), RepositoryError>;

    /// Make every write since `begin` durable
    fn commit(&self) -> Result<(), RepositoryError>;

    /// Discard every write since `begin`
    fn rollback(&self) -> Result<(), RepositoryError>;
}
