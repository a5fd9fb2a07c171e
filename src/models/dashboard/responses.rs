use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/dashboard.ts")]
pub struct EntityCounts {
    pub students: u64,
    pub classes: u64,
    pub subjects: u64,
    pub announcements: u64,
}

// 成绩分布直方图的一个区间 [lower, upper)，最后一个区间为闭区间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/dashboard.ts")]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

// 按科目的箱线图统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/dashboard.ts")]
pub struct SubjectScoreStats {
    pub subject_id: i64,
    pub subject_name: String,
    pub count: u64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/dashboard.ts")]
pub struct ClassAttendanceRate {
    // 未分班学生归入 null
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub rate: f64,
    pub marks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/dashboard.ts")]
pub struct DashboardSummary {
    pub counts: EntityCounts,
    pub score_histogram: Vec<HistogramBin>,
    pub scores_by_subject: Vec<SubjectScoreStats>,
    pub attendance_by_class: Vec<ClassAttendanceRate>,
    pub attendance_window_days: i64,
}
