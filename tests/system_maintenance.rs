mod common;

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use rust_schooldesk::cache::{CachedTable, QueryCache};
use rust_schooldesk::config::AppConfig;
use rust_schooldesk::models::grades::sheet::{GradeSheet, GradeSheetRow};
use rust_schooldesk::models::users::entities::UserRole;
use rust_schooldesk::routes;
use rust_schooldesk::runtime::lifetime::startup::{SEED_MANAGER_EMAIL, seed_manager};
use rust_schooldesk::services::system::reset::reset_database;
use rust_schooldesk::storage::Storage;
use rust_schooldesk::utils::{json_error_handler, query_error_handler};
use serde_json::{Value, json};

use common::{memory_storage, query_cache, seed_school};

#[tokio::test]
async fn seed_creates_a_single_hashed_manager() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    assert_eq!(storage.count_users().await.expect("count"), 0);

    seed_manager(&storage).await;

    assert_eq!(storage.count_users().await.expect("count"), 1);
    let manager = storage
        .get_user_by_email(SEED_MANAGER_EMAIL)
        .await
        .expect("lookup")
        .expect("seeded manager");
    assert_eq!(manager.role, UserRole::Manager);
    assert!(manager.password_hash.starts_with("$argon2id$"));

    // 已有用户时不再创建
    seed_manager(&storage).await;
    assert_eq!(storage.count_users().await.expect("count"), 1);
}

#[tokio::test]
async fn seed_skips_a_populated_store() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    seed_school(&storage).await;

    seed_manager(&storage).await;

    assert_eq!(storage.count_users().await.expect("count"), 3);
    assert!(
        storage
            .get_user_by_email(SEED_MANAGER_EMAIL)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[actix_web::test]
async fn reset_clears_data_and_restores_default_profile() {
    let storage: Arc<dyn Storage> = memory_storage().await;
    let cache: Arc<QueryCache> = query_cache();
    let school = seed_school(&storage).await;

    storage
        .reconcile_grade_sheet(&GradeSheet {
            subject_id: school.math_id,
            term: 1,
            rows: vec![GradeSheetRow {
                student_id: school.ana_id,
                score: Some(7.0),
            }],
        })
        .await
        .expect("reconcile");

    let before = CachedTable::ALL.map(|t| cache.generation(t));

    reset_database(&storage, &cache).await.expect("reset");

    let counts = storage.count_entities().await.expect("counts");
    assert_eq!(counts.students, 0);
    assert_eq!(counts.classes, 0);
    assert_eq!(counts.subjects, 0);
    assert_eq!(counts.announcements, 0);
    assert!(storage.list_subject_scores().await.expect("scores").is_empty());

    for (table, generation) in CachedTable::ALL.iter().zip(before) {
        assert!(cache.generation(*table) > generation, "{table:?} not invalidated");
    }

    // 只剩默认管理者，且正是默认档案指向的用户
    assert_eq!(storage.count_users().await.expect("count"), 1);
    let manager = storage
        .get_user_by_email(SEED_MANAGER_EMAIL)
        .await
        .expect("lookup")
        .expect("manager re-seeded");
    assert_eq!(manager.id, AppConfig::get().profile.default_user_id);

    let app = test::init_service(
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .configure(routes::configure_announcement_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/announcements")
        .set_json(json!({ "title": "Reabertura", "message": "Sistema reiniciado" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["issuer_id"], manager.id);
}
