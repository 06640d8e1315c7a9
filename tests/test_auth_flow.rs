//! Registration and login flows, and the token checks that guard the
//! record endpoints.

mod common;

use actix_web::{test, web, App};
use common::{bearer, test_state, TestState};
use rolodex_api::configure_routes;
use serde_json::{json, Value};

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

macro_rules! register {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json($body)
            .to_request();
        test::call_service($app, req).await
    }};
}

macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": $username, "password": $password }))
            .to_request();
        test::call_service($app, req).await
    }};
}

#[actix_web::test]
async fn test_register_then_login() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(&app, json!({ "username": "alice", "password": "correct-horse" }));
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered successfully");

    let resp = login!(&app, "alice", "correct-horse");
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "user");
    let token = body["token"].as_str().unwrap().to_string();

    // The issued token opens the protected endpoints
    let req = test::TestRequest::get()
        .uri("/api/records/search?customerName=acme")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_register_admin_role() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(
        &app,
        json!({ "username": "root", "password": "correct-horse", "role": "admin" })
    );
    assert_eq!(resp.status(), 201);

    let resp = login!(&app, "root", "correct-horse");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "admin");
    let token = body["token"].as_str().unwrap().to_string();

    // Admin-only listing accepts the token
    let req = test::TestRequest::get()
        .uri("/api/records")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_duplicate_username_rejected() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(&app, json!({ "username": "alice", "password": "correct-horse" }));
    assert_eq!(resp.status(), 201);

    let resp = register!(&app, json!({ "username": "Alice", "password": "other-password" }));
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn test_short_password_rejected() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(&app, json!({ "username": "alice", "password": "short" }));
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_blank_username_rejected() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(&app, json!({ "username": "   ", "password": "correct-horse" }));
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username is required");
}

#[actix_web::test]
async fn test_bad_credentials_get_one_answer() {
    let state = test_state();
    let app = init_app!(&state);

    let resp = register!(&app, json!({ "username": "alice", "password": "correct-horse" }));
    assert_eq!(resp.status(), 201);

    // Wrong password and unknown user are indistinguishable
    let resp = login!(&app, "alice", "wrong-password");
    assert_eq!(resp.status(), 401);
    let wrong_password: Value = test::read_body_json(resp).await;

    let resp = login!(&app, "nobody", "correct-horse");
    assert_eq!(resp.status(), 401);
    let unknown_user: Value = test::read_body_json(resp).await;

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["message"], "Invalid credentials");
}

#[actix_web::test]
async fn test_garbage_token_rejected() {
    let state = test_state();
    let app = init_app!(&state);

    let req = test::TestRequest::get()
        .uri("/api/records")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/records")
        .insert_header(("Authorization", "Basic abc"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}
