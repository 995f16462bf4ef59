//! Mission - A work assignment handed to one or more ninjas
//!
//! A Mission is an Entity (has identity that persists through changes).
//! Even if the title, reward or team changes, it's still the "same" mission.
//!
//! The assignee set is the single source of truth for the ninja↔mission
//! relation. Ninjas never hold mission references.

use std::collections::BTreeSet;

use super::ninja::NinjaId;
use super::rank::Rank;
use super::time::Timestamp;
use super::ParseEnumError;

/// Unique identifier for a Mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissionId(u64);

impl MissionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for MissionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty tier, easiest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    D,
    C,
    B,
    A,
    S,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::D => "D",
            Difficulty::C => "C",
            Difficulty::B => "B",
            Difficulty::A => "A",
            Difficulty::S => "S",
        }
    }

    /// A and S rank missions
    pub fn is_high_risk(&self) -> bool {
        matches!(self, Difficulty::A | Difficulty::S)
    }

    /// Whether a team with these ranks may take a mission of this tier
    ///
    /// High-risk tiers need at least one member above CHUNIN; every other
    /// tier accepts any team, including an empty one.
    pub fn is_staffed_by<I>(&self, ranks: I) -> bool
    where
        I: IntoIterator<Item = Rank>,
    {
        !self.is_high_risk() || ranks.into_iter().any(|r| r.is_high_risk_eligible())
    }

    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::D,
            Difficulty::C,
            Difficulty::B,
            Difficulty::A,
            Difficulty::S,
        ]
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("difficulty", s))
    }
}

/// The current status of a Mission
///
/// Any status may follow any other; only entering COMPLETED has a side
/// effect, and that lives in the mission engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    /// Just created, not yet started
    Pending,
    /// Currently being worked on
    Active,
    /// Finished
    Completed,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "PENDING",
            MissionStatus::Active => "ACTIVE",
            MissionStatus::Completed => "COMPLETED",
        }
    }

    pub fn all() -> &'static [MissionStatus] {
        &[
            MissionStatus::Pending,
            MissionStatus::Active,
            MissionStatus::Completed,
        ]
    }
}

impl core::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MissionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionStatus::all()
            .iter()
            .copied()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

/// A status change that actually changes something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: MissionStatus,
    pub to: MissionStatus,
}

impl StatusTransition {
    /// Entering COMPLETED; the only transition with a side effect
    pub fn completes(&self) -> bool {
        self.to == MissionStatus::Completed
    }
}

/// Partial update of a mission
///
/// `None` means "keep the current value". There is no way to express
/// "clear", because no mission field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub assignees: Option<BTreeSet<NinjaId>>,
    pub status: Option<MissionStatus>,
}

impl MissionPatch {
    /// Patch that only requests a status
    pub fn status(status: MissionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Names of present fields other than `status`
    pub fn non_status_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.reward.is_some() {
            fields.push("reward");
        }
        if self.difficulty.is_some() {
            fields.push("difficulty");
        }
        if self.assignees.is_some() {
            fields.push("assignees");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.non_status_fields().is_empty()
    }
}

/// Mission - The central unit of work
#[derive(Debug, Clone)]
pub struct Mission {
    /// Unique identifier (Entity identity)
    id: MissionId,
    /// Globally unique, case-sensitive
    title: String,
    description: String,
    reward: u32,
    difficulty: Difficulty,
    status: MissionStatus,
    /// Set once at creation
    created_at: Timestamp,
    assignees: BTreeSet<NinjaId>,
}

impl Mission {
    /// Create a new PENDING mission
    pub fn new(
        id: MissionId,
        title: impl Into<String>,
        difficulty: Difficulty,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            reward: 0,
            difficulty,
            status: MissionStatus::Pending,
            created_at,
            assignees: BTreeSet::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set reward
    pub fn with_reward(mut self, reward: u32) -> Self {
        self.reward = reward;
        self
    }

    /// Builder: set the assigned team
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = NinjaId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> MissionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn assignees(&self) -> &BTreeSet<NinjaId> {
        &self.assignees
    }

    pub fn is_assigned(&self, ninja: NinjaId) -> bool {
        self.assignees.contains(&ninja)
    }

    // ========== Partial Update ==========

    /// The transition a requested status would cause, if any
    pub fn transition_to(&self, requested: Option<MissionStatus>) -> Option<StatusTransition> {
        requested
            .filter(|to| *to != self.status)
            .map(|to| StatusTransition {
                from: self.status,
                to,
            })
    }

    /// Pure merge: the mission as it would look after `patch`
    ///
    /// Identity and creation time never change. No validation happens here.
    pub fn merged(&self, patch: &MissionPatch) -> Mission {
        Mission {
            id: self.id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            reward: patch.reward.unwrap_or(self.reward),
            difficulty: patch.difficulty.unwrap_or(self.difficulty),
            status: patch.status.unwrap_or(self.status),
            created_at: self.created_at,
            assignees: patch
                .assignees
                .clone()
                .unwrap_or_else(|| self.assignees.clone()),
        }
    }

    /// Drop a ninja from the team; returns whether it was assigned
    pub fn unassign(&mut self, ninja: NinjaId) -> bool {
        self.assignees.remove(&ninja)
    }
}

impl PartialEq for Mission {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Mission {}
