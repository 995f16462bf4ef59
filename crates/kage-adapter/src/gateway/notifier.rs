//! Notification adapters
//!
//! Neither adapter can fail from the caller's point of view: problems are
//! logged and the message is dropped.

use std::sync::{Arc, Mutex};

use kage_domain::{MissionAssigned, NinjaOnboarded, Notifier};
use shared::NotificationConfig;
use tracing::{info, warn};

/// Writes each message as a structured log event, one per recipient
#[derive(Debug, Clone)]
pub struct LogNotifier {
    from_name: String,
    dashboard_url: String,
}

impl LogNotifier {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            from_name: config.from_name.clone(),
            dashboard_url: config.dashboard_url.clone(),
        }
    }
}

impl Notifier for LogNotifier {
    fn ninja_onboarded(&self, event: &NinjaOnboarded) {
        info!(
            from = %self.from_name,
            to = %event.recipient.email,
            village = event.village.as_deref().unwrap_or("none"),
            dashboard = %self.dashboard_url,
            "Welcome to the ninja world, {}!",
            event.recipient.name
        );
    }

    fn mission_assigned(&self, event: &MissionAssigned) {
        if event.team.is_empty() {
            warn!(mission = %event.mission_title, "mission assignment with an empty team dropped");
            return;
        }

        let subject = if event.is_team_mission() {
            format!("New team mission assigned: {}!", event.mission_title)
        } else {
            format!("New mission assigned: {}!", event.mission_title)
        };

        for member in &event.team {
            info!(
                from = %self.from_name,
                to = %member.email,
                difficulty = %event.difficulty,
                teammates = ?event.teammates_of(member),
                dashboard = %self.dashboard_url,
                "{}",
                subject
            );
        }
    }
}

/// A delivered message, as seen by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Onboarded(NinjaOnboarded),
    Assigned(MissionAssigned),
}

/// Keeps every message in memory; clones share the same inbox
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inbox: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.inbox.lock() {
            Ok(inbox) => inbox.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn assignments(&self) -> Vec<MissionAssigned> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Assigned(event) => Some(event),
                Notification::Onboarded(_) => None,
            })
            .collect()
    }

    pub fn onboardings(&self) -> Vec<NinjaOnboarded> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Onboarded(event) => Some(event),
                Notification::Assigned(_) => None,
            })
            .collect()
    }

    fn record(&self, notification: Notification) {
        match self.inbox.lock() {
            Ok(mut inbox) => inbox.push(notification),
            Err(_) => warn!("notification inbox poisoned; message dropped"),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn ninja_onboarded(&self, event: &NinjaOnboarded) {
        self.record(Notification::Onboarded(event.clone()));
    }

    fn mission_assigned(&self, event: &MissionAssigned) {
        if event.team.is_empty() {
            warn!(mission = %event.mission_title, "mission assignment with an empty team dropped");
            return;
        }
        self.record(Notification::Assigned(event.clone()));
    }
}
