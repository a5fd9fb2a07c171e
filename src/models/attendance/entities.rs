use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::AttendanceConfig;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    // 缺席但已说明理由
    Justified,
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "present";
    pub const ABSENT: &'static str = "absent";
    pub const JUSTIFIED: &'static str = "justified";

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => Self::PRESENT,
            AttendanceStatus::Absent => Self::ABSENT,
            AttendanceStatus::Justified => Self::JUSTIFIED,
        }
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AttendanceStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid attendance status: '{s}'. supported: present, absent, justified"
            ))
        })
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            AttendanceStatus::JUSTIFIED => Ok(AttendanceStatus::Justified),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub lesson_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

// 班级某日考勤视图
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/attendance.ts")]
pub struct AttendanceView {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub lesson_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
}

/// 出勤率加权
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceWeights {
    pub present: f64,
    pub justified: f64,
    pub absent: f64,
}

impl AttendanceWeights {
    pub fn weight(&self, status: AttendanceStatus) -> f64 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Justified => self.justified,
            AttendanceStatus::Absent => self.absent,
        }
    }
}

impl From<&AttendanceConfig> for AttendanceWeights {
    fn from(config: &AttendanceConfig) -> Self {
        Self {
            present: config.present_weight,
            justified: config.justified_weight,
            absent: config.absent_weight,
        }
    }
}

impl Default for AttendanceWeights {
    fn default() -> Self {
        Self {
            present: 1.0,
            justified: 0.8,
            absent: 0.0,
        }
    }
}
