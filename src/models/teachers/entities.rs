use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 任课关系：某教师在某班级教授某科目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/teacher.ts")]
pub struct TeacherAssignment {
    pub teacher_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
}
