use super::entities::Student;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}
