//! End-to-end tests against the assembled router

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use parking_server::services::http::build_router;
use parking_server::{Config, ServerState};
use serde_json::{Value, json};
use shared::models::UserRole;
use tower::ServiceExt;

/// Router with the default config (admin tokens optional)
async fn setup() -> (Router, ServerState) {
    setup_with(Config::for_tests()).await
}

/// Router that enforces admin bearer tokens
async fn setup_enforced() -> (Router, ServerState) {
    let mut config = Config::for_tests();
    config.admin_auth_required = true;
    setup_with(config).await
}

async fn setup_with(config: Config) -> (Router, ServerState) {
    let state = ServerState::initialize(&config).await.expect("state");
    (build_router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string());
    send_raw(app, method, uri, token, body).await
}

/// Body is sent as-is with a JSON content type; a non-JSON response body
/// comes back as a JSON string
async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({"email": "admin@parkingsystem.com", "password": "admin123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn submission(emp_id: &str, office_id: Option<&str>) -> Value {
    json!({
        "emp_id": emp_id,
        "name": "Priya",
        "email": format!("{emp_id}@corp.example"),
        "phone": "555-0100",
        "office_id": office_id,
        "vehicle_type": "car",
        "vehicle_number": "TN-01-1234",
        "duration_type": "single_day",
        "parking_date": "2026-11-02"
    })
}

async fn create_office(app: &Router, cars: i64, bikes: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/offices",
        None,
        Some(json!({
            "name": "Annex",
            "location": "Bengaluru",
            "total_car_slots": cars,
            "total_bike_slots": bikes
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn submit(app: &Router, emp_id: &str, office_id: Option<&str>) -> String {
    let (status, created) = send(
        app,
        Method::POST,
        "/api/parking-requests",
        None,
        Some(submission(emp_id, office_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    created["id"].as_str().unwrap().to_string()
}

async fn decide(app: &Router, token: Option<&str>, decision: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/admin/approve-request", token, Some(decision)).await
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parking Management System API");

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let (app, _) = setup().await;
    let (status, body) = send(&app, Method::GET, "/api/parking-spots", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn test_offices_are_created_fully_available() {
    let (app, _) = setup().await;
    let id = create_office(&app, 3, 7).await;

    let (status, body) = send(&app, Method::GET, "/api/offices", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let offices = body.as_array().unwrap();
    // default office from bootstrap + the new one
    assert_eq!(offices.len(), 2);
    let annex = offices.iter().find(|o| o["id"] == id.as_str()).unwrap();
    assert_eq!(annex["available_car_slots"], 3);
    assert_eq!(annex["available_bike_slots"], 7);
}

#[tokio::test]
async fn test_office_with_negative_slots_is_rejected() {
    let (app, _) = setup().await;
    let office = json!({
        "name": "Bad",
        "location": "X",
        "total_car_slots": -1,
        "total_bike_slots": 0
    });
    let (status, body) = send(&app, Method::POST, "/api/offices", None, Some(office)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_submitted_request_is_listed() {
    let (app, _) = setup().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/parking-requests",
        None,
        Some(submission("E100", None)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["office_id"], "default-office");

    let (status, body) = send(&app, Method::GET, "/api/parking-requests", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["user_name"], "Priya");
    assert_eq!(list[0]["office_name"], "Main Office");

    let uri = "/api/parking-requests?status=approved";
    let (_, body) = send(&app, Method::GET, uri, None, None).await;
    assert!(body.as_array().unwrap().is_empty());

    let uri = "/api/parking-requests/user/E100";
    let (_, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_status_filter_is_a_validation_error() {
    let (app, _) = setup().await;
    let uri = "/api/parking-requests?status=parked";
    let (status, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let (app, _) = setup().await;
    let uri = "/api/parking-requests/user/NOPE";
    let (status, body) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4003);
}

#[tokio::test]
async fn test_invalid_submission_is_rejected() {
    let (app, _) = setup().await;
    let mut body = submission("E1", None);
    body["parking_date"] = json!("not-a-date");
    let (status, body) = send(&app, Method::POST, "/api/parking-requests", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_malformed_enum_fields_are_validation_errors() {
    let (app, _) = setup().await;

    let mut truck = submission("E2", None);
    truck["vehicle_type"] = json!("truck");
    let mut missing = submission("E3", None);
    missing.as_object_mut().unwrap().remove("vehicle_type");
    let mut weekly = submission("E4", None);
    weekly["duration_type"] = json!("weekly");

    for body in [truck, missing, weekly] {
        let (status, resp) =
            send(&app, Method::POST, "/api/parking-requests", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], 2);
        assert_eq!(resp["details"]["reason"], "invalid_field");
        assert!(resp["message"].is_string());
    }

    // Nothing was stored
    let (_, list) = send(&app, Method::GET, "/api/parking-requests", None, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unparsable_body_is_a_validation_error() {
    let (app, _) = setup().await;
    let body = Some("{\"email\": ".to_string());
    let (status, resp) = send_raw(&app, Method::POST, "/api/send-otp", None, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["code"], 2);
    assert_eq!(resp["details"]["reason"], "invalid_json");
}

#[tokio::test]
async fn test_login_checks_credentials() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({"email": "superadmin@parkingsystem.com", "password": "super123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "super_admin");
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({"email": "admin@parkingsystem.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn test_admin_routes_open_by_default() {
    let (app, _) = setup().await;
    let request_id = submit(&app, "E150", None).await;

    let (status, body) = decide(
        &app,
        None,
        json!({"request_id": request_id, "status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["slot_number"], "C-1");
    assert_eq!(body["request"]["approved_by"], "admin");

    let (status, body) = send(&app, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_counts"]["approved"], 1);
}

#[tokio::test]
async fn test_admin_routes_require_a_token_when_enforced() {
    let (app, _) = setup_enforced().await;

    let (status, body) = send(&app, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let token = Some("garbage");
    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", token, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = decide(&app, None, json!({"request_id": "x", "status": "approved"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Login itself stays open
    let token = admin_token(&app).await;
    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_admin_token_is_forbidden_when_enforced() {
    let (app, state) = setup_enforced().await;
    let token = state
        .jwt_service
        .generate_token("driver@corp.example", UserRole::User)
        .unwrap();

    let (status, body) =
        send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn test_approval_assigns_a_slot_and_updates_dashboard() {
    let (app, _) = setup_enforced().await;
    let token = admin_token(&app).await;
    let office_id = create_office(&app, 2, 0).await;
    let request_id = submit(&app, "E200", Some(&office_id)).await;
    let decision = json!({"request_id": request_id, "status": "approved"});

    let (status, body) = decide(&app, Some(&token), decision.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request approved successfully");
    assert_eq!(body["request"]["slot_number"], "C-1");
    assert_eq!(body["request"]["approved_by"], "admin@parkingsystem.com");

    // Second approval of the same request is an invalid transition
    let (status, body) = decide(&app, Some(&token), decision).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4102);

    let (status, body) =
        send(&app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_counts"]["approved"], 1);
    assert_eq!(body["request_counts"]["pending"], 0);
    let annex = body["office_stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["office_name"] == "Annex")
        .unwrap()
        .clone();
    assert_eq!(annex["available_car_slots"], 1);
    assert_eq!(annex["car_utilization"], 50.0);
}

#[tokio::test]
async fn test_rejection_requires_reason() {
    let (app, _) = setup().await;
    let request_id = submit(&app, "E300", None).await;

    let (status, _) = decide(
        &app,
        None,
        json!({"request_id": request_id, "status": "rejected"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = decide(
        &app,
        None,
        json!({"request_id": request_id, "status": "rejected", "rejection_reason": "No badge"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request rejected successfully");
    assert_eq!(body["request"]["rejection_reason"], "No badge");
    assert!(body["request"]["slot_number"].is_null());
}

#[tokio::test]
async fn test_deciding_unknown_request_is_not_found() {
    let (app, _) = setup().await;
    let (status, body) = decide(
        &app,
        None,
        json!({"request_id": "missing", "status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_otp_round_trip() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/send-otp",
        None,
        Some(json!({"email": "Driver@Corp.Example"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let code = body["otp"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/verify-otp",
        None,
        Some(json!({"email": "driver@corp.example", "otp": "000000x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3003);

    let verify = json!({"email": "driver@corp.example", "otp": code});
    let (status, body) =
        send(&app, Method::POST, "/api/verify-otp", None, Some(verify.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP verified successfully");

    // Consumed on success
    let (status, body) = send(&app, Method::POST, "/api/verify-otp", None, Some(verify)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3001);
}
