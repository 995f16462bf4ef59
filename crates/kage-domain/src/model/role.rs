//! RoleTag - What a ninja is allowed to do
//!
//! RoleTag is a Value Object - two tags with the same variant are equal.
//! Tags define WHAT a ninja may touch, not WHO they are. Which tag counts
//! as "elevated" is decided by the access policy, not here.

use super::ParseEnumError;

/// Access role tags carried by every ninja
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleTag {
    /// Village leadership; unrestricted over ninjas, missions and villages
    Kage,

    /// Regular ninja account
    /// Sees its own record and the missions it is assigned to
    NinjaUser,
}

impl RoleTag {
    /// Wire name of this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::Kage => "ROLE_KAGE",
            RoleTag::NinjaUser => "ROLE_NINJA_USER",
        }
    }

    /// Get a description of this tag's responsibility
    pub fn description(&self) -> &'static str {
        match self {
            RoleTag::Kage => "Leads the village: manages ninjas, missions and villages",
            RoleTag::NinjaUser => "Carries out assigned missions and reports their status",
        }
    }

    /// Get all tags (useful for iteration)
    pub fn all() -> &'static [RoleTag] {
        &[RoleTag::Kage, RoleTag::NinjaUser]
    }
}

impl core::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RoleTag {
    type Err = ParseEnumError;

    /// Accepts both `ROLE_KAGE` and the bare `KAGE`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoleTag::all()
            .iter()
            .copied()
            .find(|tag| {
                let name = tag.as_str();
                name.eq_ignore_ascii_case(wanted)
                    || name
                        .strip_prefix("ROLE_")
                        .is_some_and(|bare| bare.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}
