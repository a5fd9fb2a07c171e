mod common;

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use rust_schooldesk::cache::{CachedTable, QueryCache};
use rust_schooldesk::routes;
use rust_schooldesk::storage::Storage;
use rust_schooldesk::utils::password::verify_password;
use rust_schooldesk::utils::{json_error_handler, query_error_handler};
use serde_json::{Value, json};

use common::{memory_storage, query_cache, seed_school};

macro_rules! init_app {
    ($storage:expr, $cache:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($cache.clone()))
                .configure(routes::configure_dashboard_routes)
                .configure(routes::configure_grade_routes)
                .configure(routes::configure_attendance_routes)
                .configure(routes::configure_announcement_routes)
                .configure(routes::configure_student_routes)
                .configure(routes::configure_classes_routes)
                .configure(routes::configure_subject_routes)
                .configure(routes::configure_user_routes)
                .configure(routes::configure_teacher_routes)
                .configure(routes::configure_system_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn sheet_submission_refreshes_grade_queries_only() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache: Arc<QueryCache> = query_cache();
    let school = seed_school(&storage).await;
    let app = init_app!(storage, cache);

    let req = test::TestRequest::get().uri("/api/v1/subjects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let uri = format!("/api/v1/grades?subject_id={}", school.math_id);
    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let subjects_generation = cache.generation(CachedTable::Subjects);
    let grades_generation = cache.generation(CachedTable::Grades);

    let req = test::TestRequest::put()
        .uri("/api/v1/grades/sheet")
        .set_json(json!({
            "subject_id": school.math_id,
            "term": 1,
            "rows": [
                { "student_id": school.ana_id, "score": 8.5 },
                { "student_id": school.bruno_id, "score": null }
            ]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["inserted"], 1);
    assert_eq!(body["data"]["unchanged"], 1);

    assert_eq!(cache.generation(CachedTable::Subjects), subjects_generation);
    assert!(cache.generation(CachedTable::Grades) > grades_generation);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["student_name"], "Ana");
}

#[actix_web::test]
async fn invalid_sheet_is_rejected_before_storage() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let school = seed_school(&storage).await;
    let app = init_app!(storage, cache);

    let req = test::TestRequest::put()
        .uri("/api/v1/grades/sheet")
        .set_json(json!({
            "subject_id": school.math_id,
            "term": 1,
            "rows": [{ "student_id": school.ana_id, "score": 11.0 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4001);

    assert!(
        storage
            .find_grade(school.ana_id, school.math_id, 1)
            .await
            .expect("find")
            .is_none()
    );
}

#[actix_web::test]
async fn invalid_profile_headers_are_rejected() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let app = init_app!(storage, cache);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("X-Profile-Role", "principal"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1601);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("X-Profile-Role", "teacher"))
        .insert_header(("X-Profile-User", "2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn announcement_issuer_comes_from_profile() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let school = seed_school(&storage).await;
    let app = init_app!(storage, cache);

    let req = test::TestRequest::post()
        .uri("/api/v1/announcements")
        .insert_header(("X-Profile-User", school.teacher_id.to_string()))
        .set_json(json!({ "title": "  Prova  ", "message": "Sexta-feira", "audience": "guardian" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["issuer_id"], school.teacher_id);
    assert_eq!(body["data"]["title"], "Prova");

    let req = test::TestRequest::post()
        .uri("/api/v1/announcements")
        .set_json(json!({ "title": "   ", "message": "vazio" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn registration_errors_map_to_status_codes() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let school = seed_school(&storage).await;
    let app = init_app!(storage, cache);

    let req = test::TestRequest::post()
        .uri("/api/v1/subjects")
        .set_json(json!({ "name": "Matemática" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "name": "Paula",
            "email": "paula@escola.test",
            "password": "short",
            "role": "teacher"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/teacher-assignments")
        .set_json(json!({
            "teacher_id": school.guardian_id,
            "class_id": school.class_id,
            "subject_id": school.math_id
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .set_json(json!({
            "full_name": "Diego",
            "birth_date": "2013-01-02",
            "class_id": 9999
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 畸形 JSON 也使用统一响应结构
    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn registered_user_password_is_stored_hashed() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let app = init_app!(storage, cache);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "name": " Paula ",
            "email": "Paula@Escola.test",
            "password": "correct horse",
            "role": "teacher"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("password_hash").is_none());

    let user = storage
        .get_user_by_email("paula@escola.test")
        .await
        .unwrap()
        .expect("user stored with normalized email");
    assert_eq!(user.name, "Paula");
    assert_ne!(user.password_hash, "correct horse");
    assert!(verify_password("correct horse", &user.password_hash));
}

#[actix_web::test]
async fn reset_is_refused_when_disabled() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache = query_cache();
    let school = seed_school(&storage).await;
    let app = init_app!(storage, cache);

    let req = test::TestRequest::post()
        .uri("/api/v1/system/reset")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 5001);

    // 数据保持不变
    let subjects = storage.list_subjects().await.unwrap();
    assert!(subjects.iter().any(|s| s.id == school.math_id));
}
