use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/teacher.ts")]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
}
