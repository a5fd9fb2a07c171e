use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub birth_date: chrono::NaiveDate,
    // 未分班时为空
    pub class_id: Option<i64>,
    // 监护人（guardian 角色用户）
    pub guardian_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
