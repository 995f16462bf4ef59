//! Mission lifecycle scenarios against the in-memory store

mod common;

use common::{mission_request, Dojo, KAGE, KAKASHI, NARUTO, SAKURA, SASUKE};
use kage_domain::{
    Difficulty, MissionCriteria, MissionId, MissionRepository, MissionStatus, NinjaId,
};
use kage_usecase::UpdateMissionRequest;

#[test]
fn test_create_then_duplicate_title_conflicts() {
    let mut dojo = Dojo::new();
    let naruto = dojo.id_of(NARUTO);

    let created = dojo
        .api
        .create_mission(
            KAGE,
            mission_request("Escort the Bridge Builder", Difficulty::C, [naruto]),
        )
        .unwrap();
    assert_eq!(created.status, "PENDING");
    assert_eq!(created.assigned_ninjas.len(), 1);
    assert_eq!(created.creation_date, "2023-11-14T22:13:20+00:00");

    let err = dojo
        .api
        .create_mission(
            KAGE,
            mission_request("Escort the Bridge Builder", Difficulty::D, [naruto]),
        )
        .unwrap_err();
    assert_eq!(err.status, 409);
    assert_eq!(dojo.store.missions().count().unwrap(), 1);
}

#[test]
fn test_titles_are_case_sensitive() {
    let mut dojo = Dojo::new();
    dojo.mission("Catch Tora", Difficulty::D, &[NARUTO]);
    dojo.mission("catch tora", Difficulty::D, &[NARUTO]);
    assert_eq!(dojo.store.missions().count().unwrap(), 2);
}

#[test]
fn test_high_risk_needs_a_senior_ninja() {
    let mut dojo = Dojo::new();
    let genin = [dojo.id_of(NARUTO), dojo.id_of(SAKURA)];

    let err = dojo
        .api
        .create_mission(KAGE, mission_request("Retrieve Sasuke", Difficulty::S, genin))
        .unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(dojo.store.missions().count().unwrap(), 0);

    let with_jonin = [genin[0], genin[1], dojo.id_of(KAKASHI)];
    let created = dojo
        .api
        .create_mission(KAGE, mission_request("Retrieve Sasuke", Difficulty::S, with_jonin))
        .unwrap();
    assert_eq!(created.assigned_ninjas.len(), 3);
}

#[test]
fn test_only_the_kage_creates_and_deletes() {
    let mut dojo = Dojo::new();
    let naruto = dojo.id_of(NARUTO);

    let err = dojo
        .api
        .create_mission(NARUTO, mission_request("Ramen run", Difficulty::D, [naruto]))
        .unwrap_err();
    assert_eq!(err.status, 403);

    let id = dojo.mission("Ramen run", Difficulty::D, &[NARUTO]);
    assert_eq!(dojo.api.delete_mission(NARUTO, id).unwrap_err().status, 403);
    dojo.api.delete_mission(KAGE, id).unwrap();
    assert_eq!(
        dojo.api.delete_mission(KAGE, id).unwrap_err().status,
        404
    );
}

#[test]
fn test_unknown_assignee_is_not_found() {
    let mut dojo = Dojo::new();
    let err = dojo
        .api
        .create_mission(
            KAGE,
            mission_request("Ghost hunt", Difficulty::D, [NinjaId::new(99)]),
        )
        .unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.message, "Ninja not found with ID: 99");
}

#[test]
fn test_assignee_completes_mission_and_team_is_credited() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO, SAKURA]);

    let updated = dojo
        .api
        .update_mission(NARUTO, id, UpdateMissionRequest::status(MissionStatus::Completed))
        .unwrap();
    assert_eq!(updated.status, "COMPLETED");
    assert_eq!(dojo.completed(NARUTO), 1);
    assert_eq!(dojo.completed(SAKURA), 1);
    assert_eq!(dojo.completed(KAKASHI), 0);

    // Already COMPLETED: no second credit
    dojo.api
        .update_mission(NARUTO, id, UpdateMissionRequest::status(MissionStatus::Completed))
        .unwrap();
    assert_eq!(dojo.completed(NARUTO), 1);
}

#[test]
fn test_assignee_touching_other_fields_changes_nothing() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    let request = UpdateMissionRequest {
        title: Some("x".to_string()),
        status: Some(MissionStatus::Completed),
        ..UpdateMissionRequest::default()
    };
    let err = dojo.api.update_mission(NARUTO, id, request).unwrap_err();
    assert_eq!(err.status, 403);

    let mission = dojo.store.missions().find_by_id(id).unwrap().unwrap();
    assert_eq!(mission.title(), "Escort the Bridge Builder");
    assert_eq!(mission.status(), MissionStatus::Pending);
    assert_eq!(dojo.completed(NARUTO), 0);
}

#[test]
fn test_assignee_repeating_current_value_is_still_out_of_scope() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    let request = UpdateMissionRequest {
        title: Some("Escort the Bridge Builder".to_string()),
        status: Some(MissionStatus::Active),
        ..UpdateMissionRequest::default()
    };
    assert_eq!(dojo.api.update_mission(NARUTO, id, request).unwrap_err().status, 403);
}

#[test]
fn test_outsider_cannot_read_or_update() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    assert_eq!(dojo.api.get_mission(SASUKE, id).unwrap_err().status, 403);
    assert_eq!(
        dojo.api
            .update_mission(SASUKE, id, UpdateMissionRequest::status(MissionStatus::Active))
            .unwrap_err()
            .status,
        403
    );
    assert!(dojo.api.get_mission(NARUTO, id).is_ok());
    assert!(dojo.api.get_mission(KAGE, id).is_ok());
}

#[test]
fn test_leader_merges_partial_update() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    let request = UpdateMissionRequest {
        reward: Some(9000),
        status: Some(MissionStatus::Active),
        ..UpdateMissionRequest::default()
    };
    let updated = dojo.api.update_mission(KAGE, id, request).unwrap();

    assert_eq!(updated.reward, 9000);
    assert_eq!(updated.status, "ACTIVE");
    assert_eq!(updated.title, "Escort the Bridge Builder");
    assert_eq!(updated.description, "Escort the Bridge Builder (briefing)");
    assert_eq!(updated.assigned_ninjas.len(), 1);
}

#[test]
fn test_leader_rename_respects_uniqueness() {
    let mut dojo = Dojo::new();
    dojo.mission("Catch Tora", Difficulty::D, &[NARUTO]);
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    let rename = |title: &str| UpdateMissionRequest {
        title: Some(title.to_string()),
        ..UpdateMissionRequest::default()
    };

    assert_eq!(
        dojo.api.update_mission(KAGE, id, rename("Catch Tora")).unwrap_err().status,
        409
    );
    // Keeping its own title is not a conflict
    assert!(dojo
        .api
        .update_mission(KAGE, id, rename("Escort the Bridge Builder"))
        .is_ok());
}

#[test]
fn test_leader_update_revalidates_high_risk_rule() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Chunin exam escort", Difficulty::B, &[NARUTO, SAKURA]);

    let escalate = UpdateMissionRequest {
        difficulty: Some(Difficulty::A),
        ..UpdateMissionRequest::default()
    };
    let err = dojo.api.update_mission(KAGE, id, escalate.clone()).unwrap_err();
    assert_eq!(err.status, 403);
    let stored = dojo.store.missions().find_by_id(id).unwrap().unwrap();
    assert_eq!(stored.difficulty(), Difficulty::B);

    let restaffed = UpdateMissionRequest {
        assignee_ids: Some(vec![dojo.id_of(NARUTO), dojo.id_of(KAKASHI)]),
        ..escalate
    };
    let updated = dojo.api.update_mission(KAGE, id, restaffed).unwrap();
    assert_eq!(updated.difficulty, "A");

    // Dropping the only Jonin from an A-rank team is refused
    let strip = UpdateMissionRequest {
        assignee_ids: Some(vec![dojo.id_of(NARUTO)]),
        ..UpdateMissionRequest::default()
    };
    assert_eq!(dojo.api.update_mission(KAGE, id, strip).unwrap_err().status, 403);
}

#[test]
fn test_completion_credits_team_before_reassignment() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    let request = UpdateMissionRequest {
        assignee_ids: Some(vec![dojo.id_of(SAKURA)]),
        status: Some(MissionStatus::Completed),
        ..UpdateMissionRequest::default()
    };
    dojo.api.update_mission(KAGE, id, request).unwrap();

    assert_eq!(dojo.completed(NARUTO), 1);
    assert_eq!(dojo.completed(SAKURA), 0);
}

#[test]
fn test_status_model_is_permissive() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);

    for status in [
        MissionStatus::Completed,
        MissionStatus::Pending,
        MissionStatus::Completed,
    ] {
        dojo.api
            .update_mission(NARUTO, id, UpdateMissionRequest::status(status))
            .unwrap();
    }
    // Two separate entries into COMPLETED
    assert_eq!(dojo.completed(NARUTO), 2);
}

#[test]
fn test_delete_leaves_counters_alone() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO]);
    dojo.api
        .update_mission(NARUTO, id, UpdateMissionRequest::status(MissionStatus::Completed))
        .unwrap();

    dojo.api.delete_mission(KAGE, id).unwrap();
    assert_eq!(dojo.completed(NARUTO), 1);
}

#[test]
fn test_list_is_scoped_for_non_leaders() {
    let mut dojo = Dojo::new();
    dojo.mission("Catch Tora", Difficulty::D, &[NARUTO]);
    dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO, SAKURA]);
    dojo.mission("Spy on Orochimaru", Difficulty::B, &[KAKASHI]);

    let all = dojo.api.list_missions(KAGE, MissionCriteria::default()).unwrap();
    assert_eq!(all.len(), 3);

    let mine = dojo.api.list_missions(SAKURA, MissionCriteria::default()).unwrap();
    assert_eq!(mine.len(), 1);

    // Asking for someone else's missions still only shows your own
    let snooping = MissionCriteria {
        assigned_to: Some(dojo.id_of(KAKASHI)),
        ..MissionCriteria::default()
    };
    let seen = dojo.api.list_missions(NARUTO, snooping.clone()).unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|m| m.title != "Spy on Orochimaru"));

    let kakashis = dojo.api.list_missions(KAGE, snooping).unwrap();
    assert_eq!(kakashis.len(), 1);

    let c_rank = MissionCriteria {
        difficulty: Some(Difficulty::C),
        ..MissionCriteria::default()
    };
    assert_eq!(dojo.api.list_missions(NARUTO, c_rank).unwrap().len(), 1);
}

#[test]
fn test_assignment_notifications() {
    let mut dojo = Dojo::new();
    let id = dojo.mission("Escort the Bridge Builder", Difficulty::C, &[NARUTO, SAKURA]);

    let created = dojo.notifier.assignments();
    assert_eq!(created.len(), 1);
    assert!(created[0].is_team_mission());

    // Only the newcomer hears about the reassignment
    let request = UpdateMissionRequest {
        assignee_ids: Some(vec![dojo.id_of(NARUTO), dojo.id_of(SAKURA), dojo.id_of(KAKASHI)]),
        ..UpdateMissionRequest::default()
    };
    dojo.api.update_mission(KAGE, id, request).unwrap();
    let assignments = dojo.notifier.assignments();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[1].team.len(), 1);
    assert_eq!(assignments[1].team[0].email, KAKASHI);

    // Status changes announce nothing
    dojo.api
        .update_mission(NARUTO, id, UpdateMissionRequest::status(MissionStatus::Active))
        .unwrap();
    assert_eq!(dojo.notifier.assignments().len(), 2);
}

#[test]
fn test_validation_runs_before_the_engine() {
    let mut dojo = Dojo::new();
    let mut request = mission_request("", Difficulty::C, Vec::<NinjaId>::new());
    request.description = String::new();

    let err = dojo.api.create_mission(KAGE, request).unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(
        err.message,
        "Title cannot be empty, Description cannot be empty, Ninjas must be assigned to the mission"
    );
}

#[test]
fn test_missing_mission_is_not_found() {
    let mut dojo = Dojo::new();
    let err = dojo
        .api
        .update_mission(KAGE, MissionId::new(42), UpdateMissionRequest::status(MissionStatus::Active))
        .unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.message, "Mission not found with ID: 42");
}
