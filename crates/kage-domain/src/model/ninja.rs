//! Ninja - An operative of the village system
//!
//! Ninja is an Entity (has identity).
//! The same NinjaId refers to the same person even after a rank change,
//! a new email or a move to another village.
//!
//! The missions a ninja is assigned to are NOT stored here. Assignment is
//! owned by the mission side and looked up through
//! `MissionRepository::find_assigned_to`, so the two sides can never drift.

use std::collections::BTreeSet;

use super::rank::Rank;
use super::role::RoleTag;
use super::village::VillageId;

/// Unique identifier for a Ninja
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NinjaId(u64);

impl NinjaId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for NinjaId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ninja - An operative
#[derive(Debug, Clone)]
pub struct Ninja {
    /// Unique identifier (Entity identity)
    id: NinjaId,
    /// Display name
    name: String,
    /// Contact address, unique across ninjas; doubles as login principal
    email: String,
    /// Opaque hash produced by a `CredentialHasher`
    credential_hash: String,
    /// Seniority
    rank: Rank,
    /// Home village, if any
    village: Option<VillageId>,
    /// How many missions this ninja saw through to completion
    missions_completed: u32,
    /// ANBU black ops membership
    elite: bool,
    /// Access tags; never empty
    roles: BTreeSet<RoleTag>,
}

impl Ninja {
    /// Create a new GENIN with the regular ninja tag and no village
    pub fn new(
        id: NinjaId,
        name: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            rank: Rank::Genin,
            village: None,
            missions_completed: 0,
            elite: false,
            roles: BTreeSet::from([RoleTag::NinjaUser]),
        }
    }

    /// Builder: set rank
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Builder: set home village
    pub fn with_village(mut self, village: Option<VillageId>) -> Self {
        self.village = village;
        self
    }

    /// Builder: set ANBU membership
    pub fn with_elite(mut self, elite: bool) -> Self {
        self.elite = elite;
        self
    }

    /// Builder: replace role tags
    ///
    /// An empty set leaves the current tags in place.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleTag>) -> Self {
        self.set_roles(roles);
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> NinjaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn village(&self) -> Option<VillageId> {
        self.village
    }

    pub fn missions_completed(&self) -> u32 {
        self.missions_completed
    }

    pub fn is_elite(&self) -> bool {
        self.elite
    }

    pub fn roles(&self) -> &BTreeSet<RoleTag> {
        &self.roles
    }

    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }

    // ========== Mutations ==========

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn change_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn change_credential(&mut self, credential_hash: impl Into<String>) {
        self.credential_hash = credential_hash.into();
    }

    pub fn promote(&mut self, rank: Rank) {
        self.rank = rank;
    }

    pub fn set_elite(&mut self, elite: bool) {
        self.elite = elite;
    }

    /// Move to another village
    pub fn join_village(&mut self, village: VillageId) {
        self.village = Some(village);
    }

    /// Become unaffiliated (used when a village is dissolved)
    pub fn leave_village(&mut self) {
        self.village = None;
    }

    /// Replace role tags; returns false (and changes nothing) for an empty set
    pub fn set_roles(&mut self, roles: impl IntoIterator<Item = RoleTag>) -> bool {
        let roles: BTreeSet<RoleTag> = roles.into_iter().collect();
        if roles.is_empty() {
            return false;
        }
        self.roles = roles;
        true
    }

    /// Count one more completed mission; saturates instead of wrapping
    pub fn record_completed_mission(&mut self) {
        self.missions_completed = self.missions_completed.saturating_add(1);
    }
}

impl PartialEq for Ninja {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for Ninja {}
