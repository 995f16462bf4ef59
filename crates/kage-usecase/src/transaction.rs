//! Unit-of-work bracketing for engine mutations

use kage_domain::UnitOfWork;
use shared::Result;
use tracing::warn;

/// Close a unit of work opened with `begin`
///
/// Commits when the work succeeded and rolls back otherwise. A failed
/// rollback is logged; the original error is what the caller sees.
pub fn finish<W, T>(uow: &W, outcome: Result<T>) -> Result<T>
where
    W: UnitOfWork + ?Sized,
{
    match outcome {
        Ok(value) => {
            uow.commit()?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback) = uow.rollback() {
                warn!(%rollback, "rollback failed after: {}", error);
            }
            Err(error)
        }
    }
}
