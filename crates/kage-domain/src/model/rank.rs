//! Rank - How senior a ninja is
//!
//! Rank is a Value Object with a total order:
//! GENIN < CHUNIN < JONIN < KAGE.

use super::ParseEnumError;

/// Seniority tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Entry level
    Genin,
    /// Entry level plus one
    Chunin,
    /// Senior; the first tier trusted with high-risk missions
    Jonin,
    /// Village leader standing
    Kage,
}

impl Rank {
    /// Wire name of this rank
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Genin => "GENIN",
            Rank::Chunin => "CHUNIN",
            Rank::Jonin => "JONIN",
            Rank::Kage => "KAGE",
        }
    }

    /// Strictly more senior than `other`
    pub fn is_above(&self, other: Rank) -> bool {
        *self > other
    }

    /// Whether this rank may anchor a high-risk mission
    pub fn is_high_risk_eligible(&self) -> bool {
        self.is_above(Rank::Chunin)
    }

    /// Get all ranks (useful for iteration)
    pub fn all() -> &'static [Rank] {
        &[Rank::Genin, Rank::Chunin, Rank::Jonin, Rank::Kage]
    }
}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Rank {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("rank", s))
    }
}
