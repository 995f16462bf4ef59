//! Village coordination scenarios

mod common;

use common::{Dojo, KAGE, KAKASHI, NARUTO, SAKURA, SASUKE};
use kage_domain::{
    NinjaId, NinjaRepository, VillageCriteria, VillageId, VillageRepository,
};
use kage_usecase::{CreateVillageRequest, LeaderUpdateRequest, UpdateVillageRequest};

fn found(dojo: &mut Dojo, name: &str, kage: &str) -> VillageId {
    let request = CreateVillageRequest {
        name: name.to_string(),
        kage_id: dojo.id_of(kage),
    };
    VillageId::new(dojo.api.create_village(KAGE, request).unwrap().id)
}

fn settle(dojo: &mut Dojo, email: &str, village: VillageId) {
    let request = LeaderUpdateRequest {
        village_id: Some(village),
        ..LeaderUpdateRequest::default()
    };
    let id = dojo.id_of(email);
    dojo.api.update_ninja(KAGE, id, request).unwrap();
}

#[test]
fn test_create_village() {
    let mut dojo = Dojo::new();
    let id = found(&mut dojo, "Konohagakure", KAGE);

    let village = dojo.api.get_village(NARUTO, id).unwrap();
    assert_eq!(village.name, "Konohagakure");
    assert_eq!(village.kage.name, "Tsunade");
}

#[test]
fn test_village_names_are_unique_ignoring_case() {
    let mut dojo = Dojo::new();
    found(&mut dojo, "Konohagakure", KAGE);

    let request = CreateVillageRequest {
        name: "KONOHAGAKURE".to_string(),
        kage_id: dojo.id_of(KAKASHI),
    };
    assert_eq!(dojo.api.create_village(KAGE, request).unwrap_err().status, 409);
}

#[test]
fn test_one_village_per_kage_on_create() {
    let mut dojo = Dojo::new();
    found(&mut dojo, "Konohagakure", KAGE);

    let request = CreateVillageRequest {
        name: "Sunagakure".to_string(),
        kage_id: dojo.id_of(KAGE),
    };
    let err = dojo.api.create_village(KAGE, request).unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(dojo.store.villages().count().unwrap(), 1);
}

#[test]
fn test_unknown_kage_is_not_found() {
    let mut dojo = Dojo::new();
    let request = CreateVillageRequest {
        name: "Otogakure".to_string(),
        kage_id: NinjaId::new(404),
    };
    assert_eq!(dojo.api.create_village(KAGE, request).unwrap_err().status, 404);
}

#[test]
fn test_appointing_a_sitting_kage_elsewhere_conflicts() {
    let mut dojo = Dojo::new();
    found(&mut dojo, "Konohagakure", KAKASHI);
    let suna = found(&mut dojo, "Sunagakure", SAKURA);

    let request = UpdateVillageRequest {
        kage_id: Some(dojo.id_of(KAKASHI)),
        ..UpdateVillageRequest::default()
    };
    let err = dojo.api.update_village(KAGE, suna, request).unwrap_err();
    assert_eq!(err.status, 409);

    let unchanged = dojo.store.villages().find_by_id(suna).unwrap().unwrap();
    assert_eq!(unchanged.kage(), dojo.id_of(SAKURA));
}

#[test]
fn test_reappointing_the_current_kage_is_allowed() {
    let mut dojo = Dojo::new();
    let leaf = found(&mut dojo, "Konohagakure", KAKASHI);

    let request = UpdateVillageRequest {
        name: Some("konohagakure".to_string()),
        kage_id: Some(dojo.id_of(KAKASHI)),
    };
    let updated = dojo.api.update_village(KAGE, leaf, request).unwrap();
    assert_eq!(updated.name, "konohagakure");
}

#[test]
fn test_rename_checks_other_villages() {
    let mut dojo = Dojo::new();
    found(&mut dojo, "Konohagakure", KAKASHI);
    let suna = found(&mut dojo, "Sunagakure", SAKURA);

    let clash = UpdateVillageRequest {
        name: Some("konohaGAKURE".to_string()),
        ..UpdateVillageRequest::default()
    };
    assert_eq!(dojo.api.update_village(KAGE, suna, clash).unwrap_err().status, 409);

    let fine = UpdateVillageRequest {
        name: Some("Kirigakure".to_string()),
        ..UpdateVillageRequest::default()
    };
    let updated = dojo.api.update_village(KAGE, suna, fine).unwrap();
    assert_eq!(updated.name, "Kirigakure");
    assert_eq!(updated.kage.name, "Sakura");
}

#[test]
fn test_dissolving_a_village_rehomes_its_ninjas() {
    let mut dojo = Dojo::new();
    let leaf = found(&mut dojo, "Konohagakure", KAGE);
    let suna = found(&mut dojo, "Sunagakure", KAKASHI);
    settle(&mut dojo, NARUTO, leaf);
    settle(&mut dojo, SAKURA, leaf);
    settle(&mut dojo, SASUKE, suna);

    dojo.api.delete_village(KAGE, leaf).unwrap();

    assert!(dojo.ninja(NARUTO).village().is_none());
    assert!(dojo.ninja(SAKURA).village().is_none());
    assert_eq!(dojo.ninja(SASUKE).village(), Some(suna));
    assert_eq!(dojo.store.ninjas().count().unwrap(), 5);
    assert!(dojo.store.villages().find_by_id(leaf).unwrap().is_none());

    assert_eq!(dojo.api.delete_village(KAGE, leaf).unwrap_err().status, 404);
}

#[test]
fn test_only_the_kage_manages_villages() {
    let mut dojo = Dojo::new();
    let leaf = found(&mut dojo, "Konohagakure", KAGE);

    let request = CreateVillageRequest {
        name: "Sunagakure".to_string(),
        kage_id: dojo.id_of(KAKASHI),
    };
    assert_eq!(dojo.api.create_village(NARUTO, request).unwrap_err().status, 403);
    assert_eq!(
        dojo.api
            .update_village(NARUTO, leaf, UpdateVillageRequest::default())
            .unwrap_err()
            .status,
        403
    );
    assert_eq!(dojo.api.delete_village(NARUTO, leaf).unwrap_err().status, 403);

    // Reading is open to everyone signed in
    assert_eq!(
        dojo.api
            .list_villages(NARUTO, VillageCriteria::default())
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        dojo.api
            .list_villages("stranger@nowhere.io", VillageCriteria::default())
            .unwrap_err()
            .status,
        401
    );
}

#[test]
fn test_filter_villages_by_kage_name() {
    let mut dojo = Dojo::new();
    found(&mut dojo, "Konohagakure", KAGE);
    found(&mut dojo, "Sunagakure", KAKASHI);

    let criteria = VillageCriteria {
        kage_name: Some("Kakashi".to_string()),
    };
    let villages = dojo.api.list_villages(SAKURA, criteria).unwrap();
    assert_eq!(villages.len(), 1);
    assert_eq!(villages[0].name, "Sunagakure");
}
