//! MissionUpdateScope - Field-level rules for mission updates
//!
//! Who may change which mission fields is decided once, by the access
//! policy, which hands the engine one of these scopes. The engine then runs
//! the same update path for everyone; only the scope differs.

use kage_domain::MissionPatch;
use shared::{DenialReason, KageError, Result};

/// Update contract for one class of actor
pub trait MissionUpdateScope: core::fmt::Debug + Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Reject a patch that reaches outside this scope
    ///
    /// Rejection is all-or-nothing: nothing in the patch is applied.
    fn check(&self, patch: &MissionPatch) -> Result<()>;

    /// Whether the merged mission must be re-checked against the
    /// high-risk staffing rule
    fn requires_staffing_check(&self) -> bool;
}

/// Elevated actors: every field, in one merge
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderScope;

impl MissionUpdateScope for LeaderScope {
    fn name(&self) -> &'static str {
        "leader"
    }

    fn check(&self, _patch: &MissionPatch) -> Result<()> {
        Ok(())
    }

    fn requires_staffing_check(&self) -> bool {
        true
    }
}

/// Assigned ninjas: status only
#[derive(Debug, Clone, Copy, Default)]
pub struct AssigneeScope;

impl MissionUpdateScope for AssigneeScope {
    fn name(&self) -> &'static str {
        "assignee"
    }

    fn check(&self, patch: &MissionPatch) -> Result<()> {
        let extra = patch.non_status_fields();
        if patch.status.is_none() || !extra.is_empty() {
            return Err(KageError::denied(
                DenialReason::FieldScope,
                "Only the mission status can be updated by a ninja.",
            ));
        }
        Ok(())
    }

    fn requires_staffing_check(&self) -> bool {
        false
    }
}
