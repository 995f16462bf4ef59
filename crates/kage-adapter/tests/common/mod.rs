//! Shared fixture: a Kage plus a small squad on an in-memory store

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use kage_adapter::controller::{Gateways, KageApi};
use kage_adapter::gateway::{FixedClock, RecordingNotifier, Sha256Hasher};
use kage_adapter::repository::InMemoryStore;
use kage_domain::{
    Difficulty, MissionId, Ninja, NinjaId, NinjaRepository, Rank, RoleTag, Timestamp,
};
use kage_usecase::{CreateMissionRequest, CreateNinjaRequest};
use rbac::AccessPolicy;

pub const KAGE: &str = "tsunade@konoha.jp";
pub const NARUTO: &str = "naruto@konoha.jp";
pub const SAKURA: &str = "sakura@konoha.jp";
pub const KAKASHI: &str = "kakashi@konoha.jp";
pub const SASUKE: &str = "sasuke@konoha.jp";

pub const PASSWORD: &str = "Ramen#2024";

fn gateways(notifier: &RecordingNotifier) -> Gateways {
    Gateways {
        clock: Arc::new(FixedClock(Timestamp::from_unix_millis(1_700_000_000_000))),
        hasher: Arc::new(Sha256Hasher::new("test-pepper")),
        notifier: Arc::new(notifier.clone()),
    }
}

pub struct Dojo {
    pub store: InMemoryStore,
    pub notifier: RecordingNotifier,
    pub api: KageApi,
}

impl Dojo {
    /// Tsunade (Kage), then Naruto, Sakura (Genin), Kakashi (Jonin), Sasuke (Genin)
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let notifier = RecordingNotifier::new();
        let mut api = KageApi::new(&store, AccessPolicy::default(), gateways(&notifier));

        api.bootstrap(enlist("Tsunade", KAGE, Rank::Kage, [RoleTag::Kage]))
            .unwrap();
        for (name, email, rank) in [
            ("Naruto", NARUTO, Rank::Genin),
            ("Sakura", SAKURA, Rank::Genin),
            ("Kakashi", KAKASHI, Rank::Jonin),
            ("Sasuke", SASUKE, Rank::Genin),
        ] {
            api.create_ninja(KAGE, enlist(name, email, rank, [RoleTag::NinjaUser]))
                .unwrap();
        }

        Self {
            store,
            notifier,
            api,
        }
    }

    /// Another API over the same store, as a second request handler would have
    pub fn desk(&self) -> KageApi {
        KageApi::new(&self.store, AccessPolicy::default(), gateways(&self.notifier))
    }

    pub fn id_of(&self, email: &str) -> NinjaId {
        self.ninja(email).id()
    }

    pub fn ninja(&self, email: &str) -> Ninja {
        self.store
            .ninjas()
            .find_by_email(email)
            .unwrap()
            .unwrap_or_else(|| panic!("no ninja {}", email))
    }

    pub fn completed(&self, email: &str) -> u32 {
        self.ninja(email).missions_completed()
    }

    /// Create a mission as the Kage and return its id
    pub fn mission(&mut self, title: &str, difficulty: Difficulty, team: &[&str]) -> MissionId {
        let request = mission_request(title, difficulty, team.iter().map(|e| self.id_of(e)));
        let response = self.api.create_mission(KAGE, request).unwrap();
        MissionId::new(response.id)
    }
}

pub fn enlist<const N: usize>(
    name: &str,
    email: &str,
    rank: Rank,
    roles: [RoleTag; N],
) -> CreateNinjaRequest {
    CreateNinjaRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        rank,
        elite: false,
        roles: roles.into_iter().collect::<BTreeSet<_>>(),
        village_id: None,
    }
}

pub fn mission_request(
    title: &str,
    difficulty: Difficulty,
    team: impl IntoIterator<Item = NinjaId>,
) -> CreateMissionRequest {
    CreateMissionRequest {
        title: title.to_string(),
        description: format!("{} (briefing)", title),
        reward: 1000,
        difficulty,
        assignee_ids: team.into_iter().collect(),
    }
}
