use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩实体：(学生, 科目, 学期) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub term: i32,
    pub score: f64,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 最近成绩视图（带学生与科目名称）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeView {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub term: i32,
    pub score: f64,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

// 成绩表中的一行：班级学生及其（可能为空的）成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheetEntry {
    pub student_id: i64,
    pub student_name: String,
    pub score: Option<f64>,
}

// 成绩表初始数据，供界面编辑
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheetBaseline {
    pub class_id: i64,
    pub subject_id: i64,
    pub term: i32,
    pub rows: Vec<GradeSheetEntry>,
}
