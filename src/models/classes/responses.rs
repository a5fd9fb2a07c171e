use super::entities::Class;
use serde::Serialize;
use ts_rs::TS;

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub items: Vec<Class>,
}
