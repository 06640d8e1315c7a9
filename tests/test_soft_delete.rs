//! Soft-delete semantics: deleted records disappear from listings and
//! search but stay readable by id, their names and emails become
//! reusable, and their uniqueIds are never handed out again.

mod common;

use actix_web::{test, web, App};
use common::{admin_token, bearer, record_payload, test_state, user_token, TestState};
use rolodex_api::configure_routes;
use serde_json::Value;

macro_rules! init_app {
    ($state:expr) => {{
        let state: &TestState = $state;
        let settings = state.settings.clone();
        test::init_service(
            App::new()
                .app_data(state.registry.clone())
                .app_data(state.user_repo.clone())
                .app_data(web::Data::new(state.settings.clone()))
                .configure(move |cfg| configure_routes(cfg, &settings)),
        )
        .await
    }};
}

macro_rules! create_record {
    ($app:expr, $token:expr, $name:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/records")
            .insert_header(bearer($token))
            .set_json(record_payload($name, $email))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn test_delete_hides_record_but_keeps_it_readable() {
    let state = test_state();
    let app = init_app!(&state);
    let admin = admin_token();

    let created = create_record!(&app, &admin, "Acme Corp", "info@acme.com");
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/records/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Record deleted successfully");

    // Gone from the listing
    let req = test::TestRequest::get()
        .uri("/api/records")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body.as_array().unwrap().is_empty());

    // Still readable directly, flagged deleted
    let req = test::TestRequest::get()
        .uri(&format!("/api/records/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["isDeleted"], true);
}

#[actix_web::test]
async fn test_delete_is_idempotent() {
    let state = test_state();
    let app = init_app!(&state);
    let token = user_token();

    let created = create_record!(&app, &token, "Acme Corp", "info@acme.com");
    let id = created["id"].as_str().unwrap();

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/records/{}", id))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Record deleted successfully");
    }
}

#[actix_web::test]
async fn test_delete_unknown_id_is_404() {
    let state = test_state();
    let app = init_app!(&state);

    let req = test::TestRequest::delete()
        .uri("/api/records/no-such-id")
        .insert_header(bearer(&user_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Record not found");
}

#[actix_web::test]
async fn test_deleted_name_and_email_become_reusable() {
    let state = test_state();
    let app = init_app!(&state);
    let token = user_token();

    let created = create_record!(&app, &token, "Acme Corp", "info@acme.com");
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/records/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // Same name and email, new record, new uniqueId
    let recreated = create_record!(&app, &token, "Acme Corp", "info@acme.com");
    assert_eq!(recreated["uniqueId"], 1235);
    assert_ne!(recreated["id"], created["id"]);
}

#[actix_web::test]
async fn test_delete_all_requires_admin() {
    let state = test_state();
    let app = init_app!(&state);

    let req = test::TestRequest::delete()
        .uri("/api/records")
        .insert_header(bearer(&user_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Admin role required");
}

#[actix_web::test]
async fn test_delete_all_then_create_continues_sequence() {
    let state = test_state();
    let app = init_app!(&state);
    let admin = admin_token();

    create_record!(&app, &admin, "Acme Corp", "info@acme.com");
    create_record!(&app, &admin, "Globex", "info@globex.com");

    let req = test::TestRequest::delete()
        .uri("/api/records")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "All records deleted successfully");

    let req = test::TestRequest::get()
        .uri("/api/records")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body.as_array().unwrap().is_empty());

    // Ids 1234 and 1235 were consumed; the sequence moves on
    let next = create_record!(&app, &admin, "Initech", "info@initech.com");
    assert_eq!(next["uniqueId"], 1236);
}
