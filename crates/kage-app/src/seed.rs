//! Startup seeding
//!
//! The first seed ninja bootstraps the empty store and acts as the principal
//! for everything else.

use std::collections::BTreeSet;

use anyhow::{anyhow, bail, Context};
use kage_adapter::controller::{ApiResult, KageApi, NinjaResponse, VillageResponse};
use kage_domain::{NinjaId, Rank, RoleTag, VillageCriteria, VillageId};
use kage_usecase::{CreateNinjaRequest, CreateVillageRequest, LeaderUpdateRequest};
use serde::Serialize;
use shared::{SeedConfig, SeedNinja, SeedVillage};
use tracing::{debug, info};

/// What the seed left in the store
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub principal: String,
    pub villages: Vec<VillageResponse>,
    pub ninjas: Vec<NinjaResponse>,
}

/// Turn an API rejection into an `anyhow` error
pub fn checked<T>(result: ApiResult<T>) -> anyhow::Result<T> {
    result.map_err(|e| anyhow!("{} {}: {}", e.status, e.error, e.message))
}

/// Roster used when the configuration carries no seed
pub fn default_seed() -> SeedConfig {
    let ninja = |name: &str, email: &str, rank: Rank, roles: &[RoleTag], village: &str| SeedNinja {
        name: name.to_string(),
        email: email.to_string(),
        password: "Ramen#2024".to_string(),
        rank: rank.to_string(),
        elite: rank == Rank::Kage,
        roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
        village: Some(village.to_string()),
    };

    SeedConfig {
        ninjas: vec![
            ninja(
                "Tsunade",
                "tsunade@konoha.jp",
                Rank::Kage,
                &[RoleTag::Kage, RoleTag::NinjaUser],
                "Konohagakure",
            ),
            ninja("Gaara", "gaara@suna.jp", Rank::Kage, &[RoleTag::NinjaUser], "Sunagakure"),
            ninja("Kakashi", "kakashi@konoha.jp", Rank::Jonin, &[RoleTag::NinjaUser], "Konohagakure"),
            ninja("Naruto", "naruto@konoha.jp", Rank::Genin, &[RoleTag::NinjaUser], "Konohagakure"),
            ninja("Sakura", "sakura@konoha.jp", Rank::Genin, &[RoleTag::NinjaUser], "Konohagakure"),
            ninja("Temari", "temari@suna.jp", Rank::Chunin, &[RoleTag::NinjaUser], "Sunagakure"),
        ],
        villages: vec![
            SeedVillage {
                name: "Konohagakure".to_string(),
                kage: "tsunade@konoha.jp".to_string(),
            },
            SeedVillage {
                name: "Sunagakure".to_string(),
                kage: "gaara@suna.jp".to_string(),
            },
        ],
    }
}

fn enlistment(seed: &SeedNinja) -> anyhow::Result<CreateNinjaRequest> {
    let rank: Rank = seed
        .rank
        .parse()
        .with_context(|| format!("seed ninja {}", seed.email))?;
    let roles = seed
        .roles
        .iter()
        .map(|r| r.parse::<RoleTag>())
        .collect::<Result<BTreeSet<_>, _>>()
        .with_context(|| format!("seed ninja {}", seed.email))?;

    Ok(CreateNinjaRequest {
        name: seed.name.clone(),
        email: seed.email.clone(),
        password: seed.password.clone(),
        rank,
        elite: seed.elite,
        roles,
        village_id: None,
    })
}

/// Seed an empty store and report the resulting records
pub fn run(api: &mut KageApi, seed: &SeedConfig, elevated: RoleTag) -> anyhow::Result<SeedReport> {
    let Some((first, rest)) = seed.ninjas.split_first() else {
        bail!("the seed needs at least one ninja");
    };

    let leader = enlistment(first)?;
    if !leader.roles.contains(&elevated) {
        bail!("the first seed ninja ({}) must carry {}", first.email, elevated);
    }
    let principal = first.email.clone();
    let mut roster: Vec<(String, NinjaId)> = Vec::with_capacity(seed.ninjas.len());

    let created = checked(api.bootstrap(leader))?;
    info!(email = %principal, "Bootstrapped the roster");
    roster.push((principal.clone(), NinjaId::new(created.id)));

    for ninja in rest {
        let created = checked(api.create_ninja(&principal, enlistment(ninja)?))
            .with_context(|| format!("enlisting {}", ninja.email))?;
        debug!(email = %ninja.email, id = created.id, "Seeded ninja");
        roster.push((ninja.email.clone(), NinjaId::new(created.id)));
    }

    let id_of = |email: &str| {
        roster
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(email))
            .map(|(_, id)| *id)
            .ok_or_else(|| anyhow!("no seed ninja with email {email}"))
    };

    let mut villages: Vec<VillageResponse> = Vec::with_capacity(seed.villages.len());
    for village in &seed.villages {
        let request = CreateVillageRequest {
            name: village.name.clone(),
            kage_id: id_of(&village.kage)?,
        };
        let created = checked(api.create_village(&principal, request))
            .with_context(|| format!("founding {}", village.name))?;
        villages.push(created);
    }
    info!(count = villages.len(), "Seeded villages");

    for ninja in &seed.ninjas {
        let Some(name) = ninja.village.as_deref() else {
            continue;
        };
        let village = villages
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("{} belongs to unknown village {name}", ninja.email))?;
        let request = LeaderUpdateRequest {
            village_id: Some(VillageId::new(village.id)),
            ..LeaderUpdateRequest::default()
        };
        checked(api.update_ninja(&principal, id_of(&ninja.email)?, request))?;
    }

    let ninjas = roster
        .iter()
        .map(|(_, id)| checked(api.get_ninja(&principal, *id)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let villages = checked(api.list_villages(&principal, VillageCriteria::default()))?;
    info!(ninjas = ninjas.len(), "Seed complete");

    Ok(SeedReport {
        principal,
        villages,
        ninjas,
    })
}
