use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<User>,
}
