use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称，如 "9º Ano A"
    pub name: String,
    // 学年
    pub academic_year: i32,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
