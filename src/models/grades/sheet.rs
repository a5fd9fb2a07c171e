//! 成绩表核对
//!
//! 界面提交的是某科目某学期的一整张成绩表，每行为 `(学生, 可空分数)`。
//! 这里只做纯计算：校验成绩表，并与数据库中现有成绩比较，
//! 得出最少的写操作；实际写入由存储层在同一事务中完成。

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{Result, SchoolDeskError};

/// 分数下限
pub const MIN_SCORE: f64 = 0.0;
/// 分数上限
pub const MAX_SCORE: f64 = 10.0;
/// 合法学期
pub const TERMS: RangeInclusive<i32> = 1..=4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheetRow {
    pub student_id: i64,
    // 为空表示清除该学生的成绩
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheet {
    pub subject_id: i64,
    pub term: i32,
    pub rows: Vec<GradeSheetRow>,
}

/// 数据库中已有的成绩
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredScore {
    pub grade_id: i64,
    pub score: f64,
}

/// 单个学生的写操作
#[derive(Debug, Clone, PartialEq)]
pub enum SheetChange {
    Insert { student_id: i64, score: f64 },
    Update { grade_id: i64, student_id: i64, score: f64 },
    Delete { grade_id: i64, student_id: i64 },
    Unchanged { student_id: i64 },
}

impl SheetChange {
    pub fn is_write(&self) -> bool {
        !matches!(self, SheetChange::Unchanged { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/grade.ts")]
pub struct GradeSheetSummary {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl GradeSheetSummary {
    pub fn from_plan(plan: &[SheetChange]) -> Self {
        plan.iter().fold(Self::default(), |mut acc, change| {
            match change {
                SheetChange::Insert { .. } => acc.inserted += 1,
                SheetChange::Update { .. } => acc.updated += 1,
                SheetChange::Delete { .. } => acc.deleted += 1,
                SheetChange::Unchanged { .. } => acc.unchanged += 1,
            }
            acc
        })
    }

    pub fn writes(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

impl GradeSheet {
    /// 校验学期与分数，任一行不合法则整张表被拒绝
    pub fn validate(&self) -> Result<()> {
        if !TERMS.contains(&self.term) {
            return Err(SchoolDeskError::validation(format!(
                "term must be between {} and {}, got {}",
                TERMS.start(),
                TERMS.end(),
                self.term
            )));
        }

        for row in &self.rows {
            let Some(score) = row.score else {
                continue;
            };
            if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(SchoolDeskError::validation(format!(
                    "score for student {} must be between {MIN_SCORE} and {MAX_SCORE}, got {score}",
                    row.student_id
                )));
            }
        }

        Ok(())
    }

    /// 同一学生出现多次时以最后一行为准，顺序按首次出现
    pub fn effective_rows(&self) -> Vec<GradeSheetRow> {
        let mut last: HashMap<i64, Option<f64>> = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            last.insert(row.student_id, row.score);
        }

        let mut seen = HashSet::with_capacity(last.len());
        self.rows
            .iter()
            .filter(|row| seen.insert(row.student_id))
            .map(|row| GradeSheetRow {
                student_id: row.student_id,
                score: last[&row.student_id],
            })
            .collect()
    }

    pub fn student_ids(&self) -> Vec<i64> {
        self.effective_rows().iter().map(|r| r.student_id).collect()
    }

    /// 与现有成绩比较，得出每个学生的写操作
    pub fn plan(&self, stored: &HashMap<i64, StoredScore>) -> Vec<SheetChange> {
        self.effective_rows()
            .into_iter()
            .map(|row| match (row.score, stored.get(&row.student_id)) {
                (Some(score), None) => SheetChange::Insert {
                    student_id: row.student_id,
                    score,
                },
                (Some(score), Some(existing)) if existing.score == score => {
                    SheetChange::Unchanged {
                        student_id: row.student_id,
                    }
                }
                (Some(score), Some(existing)) => SheetChange::Update {
                    grade_id: existing.grade_id,
                    student_id: row.student_id,
                    score,
                },
                (None, Some(existing)) => SheetChange::Delete {
                    grade_id: existing.grade_id,
                    student_id: row.student_id,
                },
                (None, None) => SheetChange::Unchanged {
                    student_id: row.student_id,
                },
            })
            .collect()
    }
}
