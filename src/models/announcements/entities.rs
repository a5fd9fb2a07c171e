use crate::models::users::entities::UserRole;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub message: String,
    // 为空表示面向全体
    pub audience: Option<UserRole>,
    pub issuer_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 经过校验、待写入的公告
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub audience: Option<UserRole>,
    pub issuer_id: i64,
}
