#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_schooldesk::cache::{MokaCacheWrapper, ObjectCache, QueryCache};
use rust_schooldesk::config::DatabaseConfig;
use rust_schooldesk::models::{
    classes::requests::CreateClassRequest,
    students::requests::CreateStudentRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use rust_schooldesk::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("connect in-memory sqlite");
    Arc::new(storage)
}

pub fn query_cache() -> Arc<QueryCache> {
    let backend: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(1_000, 60));
    Arc::new(QueryCache::new(backend, 60))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 一个班级、两个科目、三名学生（按姓名：Ana, Bruno, Carla）以及三种角色的用户
pub struct School {
    pub manager_id: i64,
    pub teacher_id: i64,
    pub guardian_id: i64,
    pub class_id: i64,
    pub math_id: i64,
    pub history_id: i64,
    pub ana_id: i64,
    pub bruno_id: i64,
    pub carla_id: i64,
}

async fn user(storage: &Arc<dyn Storage>, name: &str, email: &str, role: UserRole) -> i64 {
    storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "not-a-real-hash".to_string(),
            role,
        })
        .await
        .expect("create user")
        .id
}

async fn student(storage: &Arc<dyn Storage>, name: &str, class_id: i64, guardian_id: i64) -> i64 {
    storage
        .create_student(CreateStudentRequest {
            full_name: name.to_string(),
            birth_date: date(2012, 5, 17),
            class_id: Some(class_id),
            guardian_id: Some(guardian_id),
        })
        .await
        .expect("create student")
        .id
}

pub async fn seed_school(storage: &Arc<dyn Storage>) -> School {
    let manager_id = user(storage, "Marta", "marta@escola.test", UserRole::Manager).await;
    let teacher_id = user(storage, "Tiago", "tiago@escola.test", UserRole::Teacher).await;
    let guardian_id = user(storage, "Gabriela", "gabriela@escola.test", UserRole::Guardian).await;

    let class_id = storage
        .create_class(CreateClassRequest {
            name: "7A".to_string(),
            academic_year: 2025,
        })
        .await
        .expect("create class")
        .id;

    let math_id = storage.create_subject("Matemática").await.expect("math").id;
    let history_id = storage.create_subject("História").await.expect("history").id;

    // 插入顺序与姓名顺序不同
    let carla_id = student(storage, "Carla", class_id, guardian_id).await;
    let ana_id = student(storage, "Ana", class_id, guardian_id).await;
    let bruno_id = student(storage, "Bruno", class_id, guardian_id).await;

    School {
        manager_id,
        teacher_id,
        guardian_id,
        class_id,
        math_id,
        history_id,
        ana_id,
        bruno_id,
        carla_id,
    }
}
