use super::entities::AttendanceStatus;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单条考勤记录请求；同一 (学生, 科目, 日期) 重复提交会覆盖状态
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct RecordAttendanceRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub lesson_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct RollCallMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

// 点名：某科目某日的整班考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct RollCallRequest {
    pub subject_id: i64,
    pub lesson_date: chrono::NaiveDate,
    pub marks: Vec<RollCallMark>,
}

// 考勤查询参数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    pub class_id: i64,
    pub lesson_date: chrono::NaiveDate,
    pub subject_id: Option<i64>,
}
