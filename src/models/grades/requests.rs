use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 最近成绩查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub term: Option<i32>,
}

// 成绩表查询参数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheetQuery {
    pub class_id: i64,
    pub subject_id: i64,
    pub term: i32,
}
