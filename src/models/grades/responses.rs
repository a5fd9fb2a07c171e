use super::entities::GradeView;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 最近成绩列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<GradeView>,
}
