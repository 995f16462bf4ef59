//! Guided walkthrough of the mission and village rules
//!
//! Runs against a seeded store: the demo enlists its own cast through the
//! seed principal, then records every outcome it observes.

use anyhow::Context;
use kage_adapter::controller::{ApiResult, KageApi};
use kage_domain::{Difficulty, MissionId, MissionStatus, NinjaId, Rank, RoleTag, VillageId};
use kage_usecase::{
    CreateMissionRequest, CreateNinjaRequest, CreateVillageRequest, LeaderUpdateRequest,
    UpdateMissionRequest, UpdateVillageRequest,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::seed::checked;

const PASSWORD: &str = "Ramen#2024";
const KONOHAMARU: &str = "konohamaru@academy.konoha.jp";
const MOEGI: &str = "moegi@academy.konoha.jp";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStep {
    pub scenario: String,
    pub passed: bool,
    pub outcome: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
}

impl DemoReport {
    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    /// Record an API outcome against the expected status (200 for success)
    fn observe<T>(&mut self, scenario: &str, expected: u16, result: ApiResult<T>) -> Option<T> {
        let (actual, outcome, value) = match result {
            Ok(value) => (200, "ok".to_string(), Some(value)),
            Err(e) => (e.status, format!("{} {}: {}", e.status, e.error, e.message), None),
        };
        self.push(scenario, actual == expected, outcome);
        value
    }

    fn verify(&mut self, scenario: &str, holds: bool, outcome: String) {
        self.push(scenario, holds, outcome);
    }

    fn push(&mut self, scenario: &str, passed: bool, outcome: String) {
        if passed {
            info!(scenario, %outcome, "Demo step passed");
        } else {
            warn!(scenario, %outcome, "Demo step diverged");
        }
        self.steps.push(DemoStep {
            scenario: scenario.to_string(),
            passed,
            outcome,
        });
    }
}

fn enlist(
    api: &mut KageApi,
    principal: &str,
    name: &str,
    email: &str,
    rank: Rank,
) -> anyhow::Result<NinjaId> {
    let request = CreateNinjaRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        rank,
        elite: false,
        roles: [RoleTag::NinjaUser].into_iter().collect(),
        village_id: None,
    };
    let created = checked(api.create_ninja(principal, request))
        .with_context(|| format!("enlisting demo ninja {email}"))?;
    Ok(NinjaId::new(created.id))
}

fn completed_counts(api: &KageApi, principal: &str, ids: &[NinjaId]) -> anyhow::Result<Vec<u32>> {
    ids.iter()
        .map(|id| checked(api.get_ninja(principal, *id)).map(|n| n.mission_completed_count))
        .collect()
}

pub fn run(api: &mut KageApi, principal: &str) -> anyhow::Result<DemoReport> {
    let konohamaru = enlist(api, principal, "Konohamaru", KONOHAMARU, Rank::Genin)?;
    let moegi = enlist(api, principal, "Moegi", MOEGI, Rank::Genin)?;
    let ebisu = enlist(api, principal, "Ebisu", "ebisu@academy.konoha.jp", Rank::Jonin)?;
    let iruka = enlist(api, principal, "Iruka", "iruka@academy.konoha.jp", Rank::Chunin)?;
    let shizune = enlist(api, principal, "Shizune", "shizune@academy.konoha.jp", Rank::Chunin)?;

    let mut report = DemoReport::default();

    // Unique titles
    let escort = CreateMissionRequest {
        title: "Escort the Bridge Builder".to_string(),
        description: "See Tazuna safely home to the Land of Waves".to_string(),
        reward: 3_000,
        difficulty: Difficulty::C,
        assignee_ids: vec![konohamaru],
    };
    let created = api.create_mission(principal, escort.clone());
    if let Some(created) = report.observe("create a C-rank mission", 200, created) {
        report.verify(
            "a new mission starts PENDING",
            created.status == MissionStatus::Pending.to_string(),
            created.status,
        );
    }
    report.observe(
        "a second mission with the same title conflicts",
        409,
        api.create_mission(principal, escort),
    );

    // High-risk staffing
    let mut scroll = CreateMissionRequest {
        title: "Retrieve the Scroll of Seals".to_string(),
        description: "Recover the forbidden scroll before dawn".to_string(),
        reward: 90_000,
        difficulty: Difficulty::S,
        assignee_ids: vec![konohamaru, moegi],
    };
    report.observe(
        "an S-rank team of Genin is refused",
        403,
        api.create_mission(principal, scroll.clone()),
    );
    scroll.assignee_ids.push(ebisu);
    let scroll = report
        .observe(
            "adding a Jonin staffs the S-rank mission",
            200,
            api.create_mission(principal, scroll),
        )
        .map(|m| MissionId::new(m.id));

    // Assignee scope and completion credit
    if let Some(scroll) = scroll {
        let team = [konohamaru, moegi, ebisu];
        let complete = UpdateMissionRequest {
            status: Some(MissionStatus::Completed),
            ..UpdateMissionRequest::default()
        };
        report.observe(
            "an assignee completes the mission",
            200,
            api.update_mission(KONOHAMARU, scroll, complete.clone()),
        );
        let counts = completed_counts(api, principal, &team)?;
        report.verify(
            "every assignee is credited once",
            counts.iter().all(|c| *c == 1),
            format!("{counts:?}"),
        );

        let overreach = UpdateMissionRequest {
            title: Some("x".to_string()),
            ..complete.clone()
        };
        report.observe(
            "an assignee cannot touch other fields",
            403,
            api.update_mission(KONOHAMARU, scroll, overreach),
        );
        let title = checked(api.get_mission(principal, scroll))?.title;
        report.verify(
            "the refused update left the mission alone",
            title == "Retrieve the Scroll of Seals",
            title,
        );

        report.observe(
            "completing again is accepted",
            200,
            api.update_mission(MOEGI, scroll, complete),
        );
        let counts = completed_counts(api, principal, &team)?;
        report.verify(
            "completing again credits nobody",
            counts.iter().all(|c| *c == 1),
            format!("{counts:?}"),
        );
    }

    // One village per Kage
    let found = |api: &mut KageApi, name: &str, kage_id: NinjaId| {
        let request = CreateVillageRequest {
            name: name.to_string(),
            kage_id,
        };
        checked(api.create_village(principal, request))
            .map(|v| VillageId::new(v.id))
            .with_context(|| format!("founding demo village {name}"))
    };
    found(api, "Amegakure", iruka)?;
    let taki = found(api, "Takigakure", shizune)?;

    let usurp = UpdateVillageRequest {
        kage_id: Some(iruka),
        ..UpdateVillageRequest::default()
    };
    report.observe(
        "a sitting Kage cannot lead a second village",
        409,
        api.update_village(principal, taki, usurp),
    );
    let leader = checked(api.get_village(principal, taki))?.kage.name;
    report.verify("the second village keeps its Kage", leader == "Shizune", leader);

    // Dissolution
    for id in [konohamaru, moegi] {
        let settle = LeaderUpdateRequest {
            village_id: Some(taki),
            ..LeaderUpdateRequest::default()
        };
        checked(api.update_ninja(principal, id, settle))?;
    }
    report.observe(
        "dissolving a village with two members",
        200,
        api.delete_village(principal, taki),
    );
    let homeless = [konohamaru, moegi]
        .iter()
        .map(|id| checked(api.get_ninja(principal, *id)).map(|n| n.village.is_none()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    report.verify(
        "its members are left without a village",
        homeless.iter().all(|h| *h),
        format!("{homeless:?}"),
    );
    report.observe(
        "the dissolved village is gone",
        404,
        api.get_village(principal, taki),
    );

    info!(
        steps = report.steps.len(),
        passed = report.all_passed(),
        "Demo finished"
    );
    Ok(report)
}
