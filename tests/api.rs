use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use clinic_server::{
    database::{build_pool, get_db_conn, run_migrations},
    routes, AppState, Config,
};

fn app_state(dir: &tempfile::TempDir) -> web::Data<AppState> {
    let database_url = dir.path().join("clinic.db").to_string_lossy().to_string();
    let pool = build_pool(&database_url, 2).unwrap();
    run_migrations(&mut get_db_conn(&pool).unwrap()).unwrap();
    web::Data::new(AppState {
        pool,
        config: Config {
            database_url,
            ..Config::default()
        },
    })
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let (status, body) = post!(
            $app,
            "/auth/login",
            json!({ "username": $username, "password": "Secret#123" })
        );
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["login_token"].as_str().unwrap().to_string()
    }};
}

fn doctor_body(username: &str, license: &str) -> Value {
    json!({
        "username": username,
        "password": "Secret#123",
        "firstname": "Gregory",
        "lastname": "House",
        "specialty": "CARDIOLOGY",
        "medical_license_number": license,
    })
}

fn patient_body(username: &str, ssn: &str) -> Value {
    json!({
        "username": username,
        "password": "Secret#123",
        "firstname": "Alice",
        "lastname": "Liddell",
        "ssn": ssn,
        "email": "alice@example.org",
        "phone_number": "5551234567",
    })
}

#[actix_web::test]
async fn booking_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(app_state(&dir)).configure(routes)).await;

    let (status, body) = post!(app, "/doctor/register", doctor_body("drhouse", "1234567"));
    assert_eq!(status, StatusCode::OK, "{}", body);
    let doctor_id = body["id"].as_i64().unwrap();
    let (status, body) = post!(app, "/patient/register", patient_body("alice01", "123456789"));
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, body) = post!(
        app,
        "/auth/login",
        json!({ "username": "drhouse", "password": "Secret#123" })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "DOCTOR");
    assert_eq!(body["dashboard"], "/doctor/dashboard");
    let doctor_token = body["login_token"].as_str().unwrap().to_string();
    let patient_token = login!(app, "alice01");

    let (status, body) = post!(
        app,
        "/patient/book",
        json!({ "login_token": patient_token, "doctor_id": doctor_id, "appointment_time": "2024-06-10T10:00" })
    );
    assert_eq!(status, StatusCode::OK, "{}", body);
    let first_id = body["id"].as_i64().unwrap();

    let (status, body) = post!(
        app,
        "/patient/book",
        json!({ "login_token": patient_token, "doctor_id": doctor_id, "appointment_time": "2024-06-10T10:30" })
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["err"], "The appointment time is not available.");

    let (status, body) = post!(
        app,
        "/patient/book",
        json!({ "login_token": patient_token, "doctor_id": doctor_id, "appointment_time": "2024-06-10T21:00" })
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["err"], "Appointment time is outside of office hours.");

    let (status, body) = post!(app, "/doctor/dashboard", json!({ "login_token": doctor_token }));
    assert_eq!(status, StatusCode::OK);
    let appointments = body["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], "PENDING");
    assert_eq!(appointments[0]["appointment_time"], "2024-06-10T10:00:00");
    assert_eq!(appointments[0]["patient_lastname"], "Liddell");

    let (status, _) = post!(
        app,
        "/doctor/change_status",
        json!({ "login_token": doctor_token, "id": first_id, "status": "CANCELLED" })
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(
        app,
        "/patient/book",
        json!({ "login_token": patient_token, "doctor_id": doctor_id, "appointment_time": "2024-06-10T10:00" })
    );
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, body) = post!(app, "/patient/dashboard", json!({ "login_token": patient_token }));
    assert_eq!(status, StatusCode::OK);
    let statuses: Vec<_> = body["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["status"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.contains(&"CANCELLED".to_string()));
    assert!(statuses.contains(&"PENDING".to_string()));
}

#[actix_web::test]
async fn registration_errors_map_to_statuses() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(app_state(&dir)).configure(routes)).await;

    let (status, _) = post!(app, "/doctor/register", doctor_body("drhouse", "1234567"));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post!(app, "/doctor/register", doctor_body("drwilson", "1234567"));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = post!(app, "/patient/register", patient_body("drhouse", "123456789"));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post!(app, "/patient/register", patient_body("alice01", "12-34"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["err"].as_str().unwrap().contains("ssn"));

    let req = test::TestRequest::post()
        .uri("/patient/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": 5")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn tokens_and_ownership_are_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(app_state(&dir)).configure(routes)).await;

    let (_, body) = post!(app, "/doctor/register", doctor_body("drhouse", "1234567"));
    let doctor_id = body["id"].as_i64().unwrap();
    post!(app, "/patient/register", patient_body("alice01", "123456789"));
    post!(app, "/patient/register", patient_body("bobby01", "987654321"));

    let (status, body) = post!(app, "/patient/dashboard", json!({ "login_token": "bogus" }));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = post!(
        app,
        "/auth/login",
        json!({ "username": "alice01", "password": "wrong" })
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let alice = login!(app, "alice01");
    let bob = login!(app, "bobby01");

    let (_, body) = post!(
        app,
        "/patient/book",
        json!({ "login_token": alice, "doctor_id": doctor_id, "appointment_time": "2024-06-10T10:00" })
    );
    let appointment_id = body["id"].as_i64().unwrap();

    let (status, _) = post!(
        app,
        "/patient/delete_appoint",
        json!({ "login_token": bob, "id": appointment_id })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post!(
        app,
        "/patient/modify_appoint",
        json!({ "login_token": alice, "id": appointment_id, "appointment_time": "2024-06-10T10:30" })
    );
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, _) = post!(
        app,
        "/patient/delete_appoint",
        json!({ "login_token": alice, "id": appointment_id })
    );
    assert_eq!(status, StatusCode::OK);

    // a patient token does not resolve to a doctor
    let (status, _) = post!(app, "/doctor/dashboard", json!({ "login_token": alice }));
    assert_eq!(status, StatusCode::NOT_FOUND);

    post!(app, "/auth/logout", json!({ "login_token": alice }));
    let (status, _) = post!(app, "/patient/dashboard", json!({ "login_token": alice }));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn doctor_directory() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(app_state(&dir)).configure(routes)).await;

    let (_, body) = post!(app, "/doctor/register", doctor_body("drhouse", "1234567"));
    let doctor_id = body["id"].as_i64().unwrap();
    post!(app, "/patient/register", patient_body("alice01", "123456789"));
    let alice = login!(app, "alice01");

    let (status, body) = post!(
        app,
        "/patient/search_doctor",
        json!({ "login_token": alice, "lastname": "ho" })
    );
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["doctors"][0]["id"].as_i64(), Some(doctor_id));

    let (status, _) = post!(
        app,
        "/patient/search_doctor",
        json!({ "login_token": alice, "specialty": "UROLOGY" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post!(
        app,
        "/patient/view_doctor",
        json!({ "login_token": alice, "id": doctor_id })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["specialty"], "CARDIOLOGY");

    let (_, body) = post!(app, "/patient/specialties", json!({ "login_token": alice }));
    assert_eq!(body["specialties"].as_array().unwrap().len(), 13);
}
