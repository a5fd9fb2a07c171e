use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/student.ts")]
pub struct StudentListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub guardian_id: Option<i64>,
    pub search: Option<String>,
}

// 学生注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub birth_date: chrono::NaiveDate,
    pub class_id: Option<i64>,
    pub guardian_id: Option<i64>,
}
