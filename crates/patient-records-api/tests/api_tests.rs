//! Router tests.
//!
//! Requests go through the full axum router in-process over a fresh in-memory
//! store per test.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use patient_records_api::{router, AppState, StoreConfig};
use patient_records_core::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Box::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn patient(id: &str, height: f64, weight: f64) -> Value {
    json!({
        "id": id,
        "name": "Ananya Verma",
        "city": "Guwahati",
        "age": 28,
        "gender": "female",
        "height": height,
        "weight": weight
    })
}

#[tokio::test]
async fn test_welcome_and_about() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Patient Management API");

    let (status, body) = send(&app, Method::GET, "/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("patient information"));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_create_then_view() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/create_patient",
        Some(patient("P001", 1.8, 90.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Patient created successfully");
    assert_eq!(body["patient"]["bmi"], 27.78);
    assert_eq!(body["patient"]["verdict"], "Overweight");
    assert!(body["patient"].get("id").is_none());

    let (status, body) = send(&app, Method::GET, "/view_patient/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ananya Verma");
    assert_eq!(body["bmi"], 27.78);

    let (status, body) = send(&app, Method::GET, "/view_all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["P001"]["verdict"], "Overweight");
}

#[tokio::test]
async fn test_client_supplied_bmi_ignored() {
    let app = app();
    let mut body = patient("P001", 1.6, 50.0);
    body["bmi"] = json!(45.0);
    body["verdict"] = json!("Obese");

    let (status, body) = send(&app, Method::POST, "/create_patient", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["patient"]["bmi"], 19.53);
    assert_eq!(body["patient"]["verdict"], "Normal");
}

#[tokio::test]
async fn test_duplicate_create_is_conflict() {
    let app = app();
    send(&app, Method::POST, "/create_patient", Some(patient("P001", 1.8, 90.0))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/create_patient",
        Some(patient("P001", 1.5, 45.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Patient with this ID already exists");

    let (_, body) = send(&app, Method::GET, "/view_patient/P001", None).await;
    assert_eq!(body["weight"], 90.0);
}

#[tokio::test]
async fn test_invalid_create_is_unprocessable() {
    let app = app();
    let mut body = patient("P001", 1.8, 90.0);
    body["age"] = json!(130);

    let (status, body) = send(&app, Method::POST, "/create_patient", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().starts_with("invalid age"));

    let (_, all) = send(&app, Method::GET, "/view_all", None).await;
    assert_eq!(all, json!({}));
}

#[tokio::test]
async fn test_create_without_id_is_unprocessable() {
    let app = app();
    let mut body = patient("P001", 1.8, 90.0);
    body.as_object_mut().unwrap().remove("id");

    let (status, body) = send(&app, Method::POST, "/create_patient", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "invalid id: field required");
}

#[tokio::test]
async fn test_malformed_json_is_unprocessable() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/create_patient")
        .header("content-type", "application/json")
        .body(Body::from("{\"id\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_float_age_is_unprocessable() {
    let app = app();
    let mut body = patient("P001", 1.8, 90.0);
    body["age"] = json!(30.0);

    let (status, _) = send(&app, Method::POST, "/create_patient", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, all) = send(&app, Method::GET, "/view_all", None).await;
    assert_eq!(all, json!({}));
}

#[tokio::test]
async fn test_view_missing_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/view_patient/P404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient not found");
}

#[tokio::test]
async fn test_partial_edit() {
    let app = app();
    send(&app, Method::POST, "/create_patient", Some(patient("P001", 1.8, 90.0))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/edit/P001",
        Some(json!({"city": "Shillong", "weight": 70.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["city"], "Shillong");
    assert_eq!(body["patient"]["name"], "Ananya Verma");
    assert_eq!(body["patient"]["bmi"], 21.6);
    assert_eq!(body["patient"]["verdict"], "Normal");

    let (_, stored) = send(&app, Method::GET, "/view_patient/P001", None).await;
    assert_eq!(stored["city"], "Shillong");
    assert_eq!(stored["age"], 28);
}

#[tokio::test]
async fn test_edit_rejects_others_gender() {
    let app = app();
    send(&app, Method::POST, "/create_patient", Some(patient("P001", 1.8, 90.0))).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/edit/P001",
        Some(json!({"gender": "others"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, stored) = send(&app, Method::GET, "/view_patient/P001", None).await;
    assert_eq!(stored["gender"], "female");
}

#[tokio::test]
async fn test_edit_missing_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::PUT, "/edit/P404", Some(json!({"age": 40}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app();
    send(&app, Method::POST, "/create_patient", Some(patient("P001", 1.8, 90.0))).await;

    let (status, body) = send(&app, Method::DELETE, "/delete/P001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted successfully");

    let (status, _) = send(&app, Method::GET, "/view_patient/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/delete/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sort_by_bmi() {
    let app = app();
    send(&app, Method::POST, "/create_patient", Some(patient("P1", 1.8, 90.0))).await;
    send(&app, Method::POST, "/create_patient", Some(patient("P2", 1.6, 50.0))).await;

    let (status, body) = send(&app, Method::GET, "/sort?sort_by=bmi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "P2");
    assert_eq!(body[0]["bmi"], 19.53);
    assert_eq!(body[1]["id"], "P1");
    assert_eq!(body[1]["verdict"], "Overweight");

    let (_, body) = send(&app, Method::GET, "/sort?sort_by=BMI&order=Desc", None).await;
    assert_eq!(body[0]["id"], "P1");
}

#[tokio::test]
async fn test_sort_bad_arguments() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/sort?sort_by=age", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        r#"Invalid sort_by. Must be one of ["height", "weight", "bmi"]"#
    );

    let (status, _) = send(&app, Method::GET, "/sort?sort_by=bmi&order=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/sort", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_json_store_backed_router() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.json");
    let store = StoreConfig::Json(path.clone()).open().unwrap();
    let app = router(AppState::new(store));

    let (status, _) = send(&app, Method::POST, "/create_patient", Some(patient("P001", 1.8, 90.0))).await;
    assert_eq!(status, StatusCode::CREATED);

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["P001"]["verdict"], "Overweight");
}
