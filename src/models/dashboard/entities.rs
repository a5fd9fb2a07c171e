use crate::models::attendance::entities::AttendanceStatus;

// 单条成绩及其科目，用于统计
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectScore {
    pub subject_id: i64,
    pub subject_name: String,
    pub score: f64,
}

// 单条考勤及学生所在班级，用于出勤率统计
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceMark {
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub status: AttendanceStatus,
}
