use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    pub academic_year: Option<i32>,
    pub search: Option<String>,
}

// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub academic_year: i32,
}
