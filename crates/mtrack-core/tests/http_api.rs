mod common;

use std::io::Write;

use chrono::{TimeZone, Utc};
use mtrack_core::model::{NewMachine, NewRepair, Price, PriceUpdate, RecordId, RepairKind, Session};
use mtrack_core::{
    build_report, fetch_machine_detail, fetch_snapshot, ApiConfig, FilterState, HttpApi,
    ReportView, TrackerApi, TrackerError, YearMonth,
};

fn client(fake: &common::FakeApi) -> HttpApi {
    HttpApi::new(&ApiConfig::new(fake.base_url())).expect("client should build")
}

fn session() -> Session {
    Session::new("bola", common::TOKEN)
}

#[test]
fn test_login_returns_session() {
    let fake = common::spawn(common::seeded_state());
    let session = client(&fake)
        .login("bola", common::PASSWORD)
        .expect("login should succeed");
    assert_eq!(session.username, "bola");
    assert_eq!(session.access, common::TOKEN);
    assert_eq!(session.refresh.as_deref(), Some("ref-456"));
}

#[test]
fn test_login_wrong_password_is_unauthorized() {
    let fake = common::spawn(common::seeded_state());
    let err = client(&fake).login("bola", "wrong").unwrap_err();
    match err {
        TrackerError::Unauthorized(message) => assert!(message.contains("No active account")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_register_posts_credentials() {
    let fake = common::spawn(common::seeded_state());
    client(&fake)
        .register("ada", "pw")
        .expect("register should succeed");
    let body = fake.state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["username"], "ada");
    assert_eq!(body["password"], "pw");
}

#[test]
fn test_bad_token_is_unauthorized() {
    let fake = common::spawn(common::seeded_state());
    let err = client(&fake)
        .list_machines(&Session::new("bola", "stale"))
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn test_profile_and_details() {
    let fake = common::spawn(common::seeded_state());
    let api = client(&fake);
    let profile = api.user_profile(&session()).expect("profile should load");
    assert_eq!(profile.role.as_deref(), Some("Admin Staff"));
    let details = api.user_details(&session()).expect("details should load");
    assert_eq!(details.display_name().as_deref(), Some("Bola Ade"));
}

#[test]
fn test_missing_repair_is_not_found() {
    let fake = common::spawn(common::seeded_state());
    let err = client(&fake)
        .get_repair(&session(), &RecordId::from(404))
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[test]
fn test_unreachable_server_is_network_error() {
    let api = HttpApi::new(
        &ApiConfig::new("http://127.0.0.1:9/api/")
            .with_timeout(std::time::Duration::from_secs(2)),
    )
    .expect("client should build");
    let err = api.list_machines(&session()).unwrap_err();
    assert!(matches!(err, TrackerError::Network(_)));
}

#[test]
fn test_snapshot_and_report() {
    let fake = common::spawn(common::seeded_state());
    let snapshot = fetch_snapshot(&client(&fake), &session()).expect("snapshot should load");
    assert_eq!(snapshot.machines.len(), 2);
    assert_eq!(snapshot.repairs.len(), 4);
    assert_eq!(snapshot.repairs[2].type_label(), Some("Blade"));

    let filter = FilterState::new().with_month(YearMonth::new(2024, 3).unwrap());
    let report = build_report(
        &snapshot.machines,
        &snapshot.repairs,
        &filter,
        &ReportView::AllMachines,
    );
    assert_eq!(report.machines.len(), 2);
    assert_eq!(report.grand_total, 800.0);
}

#[test]
fn test_machine_detail_uses_machine_filter() {
    let fake = common::spawn(common::seeded_state());
    let snapshot = fetch_machine_detail(&client(&fake), &session(), &RecordId::from(1))
        .expect("detail should load");
    assert_eq!(snapshot.machines.len(), 1);
    assert_eq!(snapshot.repairs.len(), 2);
}

#[test]
fn test_create_repair_with_custom_label() {
    let fake = common::spawn(common::seeded_state());
    let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
    let new_repair = NewRepair::new(
        RecordId::from(2),
        RepairKind::Custom("Welding".to_string()),
        Price::from_input("80"),
        now,
    );
    let created = client(&fake)
        .create_repair(&session(), &new_repair)
        .expect("create should succeed");
    assert_eq!(created.type_label(), Some("Welding"));

    let body = fake.state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["repair_type"], "");
    assert_eq!(body["machine"], 2);
}

#[test]
fn test_update_price_and_delete() {
    let fake = common::spawn(common::seeded_state());
    let api = client(&fake);
    let id = RecordId::from(10);

    let current = api.get_repair(&session(), &id).expect("repair should load");
    let update = PriceUpdate::from_repair(&current, Price::from_input("650"), "bola", Utc::now());
    let updated = api
        .update_repair_price(&session(), &id, &update)
        .expect("update should succeed");
    assert_eq!(updated.price.amount(), 650.0);
    assert_eq!(updated.updated_by.as_deref(), Some("bola"));

    api.delete_repair(&session(), &id)
        .expect("delete should succeed");
    let err = api.get_repair(&session(), &id).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[test]
fn test_create_machine_uploads_form() {
    let fake = common::spawn(common::seeded_state());
    let mut image = tempfile::NamedTempFile::new().expect("temp file");
    image.write_all(b"not really a jpeg").expect("write image");

    let machine = client(&fake)
        .create_machine(&session(), &NewMachine::new("Harrow").with_image(image.path()))
        .expect("create should succeed");
    assert_eq!(machine.name, "Harrow");
    assert_eq!(machine.id, RecordId::from(3));

    let upload = fake.state.lock().unwrap().last_upload.clone().unwrap();
    assert!(upload.contains("Machine is beautiful"));
    assert!(upload.contains("not really a jpeg"));
}

#[test]
fn test_create_machine_missing_image_is_invalid_input() {
    let fake = common::spawn(common::seeded_state());
    let err = client(&fake)
        .create_machine(
            &session(),
            &NewMachine::new("Harrow").with_image("/nonexistent/harrow.jpg"),
        )
        .unwrap_err();
    assert!(matches!(err, TrackerError::InvalidInput(_)));
}
