//! Notifier - Fire-and-forget announcements
//!
//! Delivery failures are the notifier's problem: methods return nothing,
//! and a use case never changes course because a message was lost.

use crate::model::mission::Difficulty;

/// Who a notification is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A ninja joined the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NinjaOnboarded {
    pub recipient: Recipient,
    /// Name of the home village, if the ninja has one
    pub village: Option<String>,
}

/// Ninjas were put on a mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionAssigned {
    pub mission_title: String,
    pub mission_description: String,
    pub difficulty: Difficulty,
    /// Only the ninjas that are new to the mission
    pub team: Vec<Recipient>,
}

impl MissionAssigned {
    /// More than one ninja is being told
    pub fn is_team_mission(&self) -> bool {
        self.team.len() > 1
    }

    /// Everyone on the team except `member`
    pub fn teammates_of(&self, member: &Recipient) -> Vec<&str> {
        self.team
            .iter()
            .filter(|r| r.email != member.email)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Notifier Trait
///
/// This is a PORT in hexagonal architecture.
pub trait Notifier: Send + Sync {
    fn ninja_onboarded(&self, event: &NinjaOnboarded);

    fn mission_assigned(&self, event: &MissionAssigned);
}

/// Notifier that drops everything (notifications disabled)
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn ninja_onboarded(&self, _event: &NinjaOnboarded) {}

    fn mission_assigned(&self, _event: &MissionAssigned) {}
}
