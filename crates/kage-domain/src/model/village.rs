//! Village - An organizational unit led by exactly one Kage

use super::ninja::NinjaId;

/// Unique identifier for a Village
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VillageId(u64);

impl VillageId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for VillageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Village - Names are unique ignoring case; a ninja leads at most one village
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Village {
    id: VillageId,
    name: String,
    kage: NinjaId,
}

impl Village {
    pub fn new(id: VillageId, name: impl Into<String>, kage: NinjaId) -> Self {
        Self {
            id,
            name: name.into(),
            kage,
        }
    }

    pub fn id(&self) -> VillageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kage(&self) -> NinjaId {
        self.kage
    }

    /// Case-insensitive name comparison, the rule used for uniqueness
    pub fn is_named(&self, name: &str) -> bool {
        same_village_name(&self.name, name)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn appoint_kage(&mut self, kage: NinjaId) {
        self.kage = kage;
    }
}

/// Village names compare without regard to case
pub fn same_village_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
