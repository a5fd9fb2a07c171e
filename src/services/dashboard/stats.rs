//! 仪表盘统计
//!
//! 纯计算函数：成绩直方图、按科目的四分位统计、按班级的加权出勤率。

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{
    attendance::entities::AttendanceWeights,
    dashboard::{
        entities::{AttendanceMark, SubjectScore},
        responses::{ClassAttendanceRate, HistogramBin, SubjectScoreStats},
    },
    grades::sheet::{MAX_SCORE, MIN_SCORE},
};

pub const HISTOGRAM_BINS: usize = 10;

/// 10 个等宽区间覆盖 [0, 10]，最后一个区间包含 10
pub fn score_histogram<I>(scores: I) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = f64>,
{
    let width = (MAX_SCORE - MIN_SCORE) / HISTOGRAM_BINS as f64;
    let mut counts = [0u64; HISTOGRAM_BINS];

    for score in scores {
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            continue;
        }
        let index = (((score - MIN_SCORE) / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        counts[index] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: MIN_SCORE + i as f64 * width,
            upper: MIN_SCORE + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// 线性插值分位数，`sorted` 必须已升序且非空
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

/// 按科目汇总，科目按名称排序；没有成绩的科目不出现
pub fn scores_by_subject(rows: Vec<SubjectScore>) -> Vec<SubjectScoreStats> {
    let mut grouped: HashMap<i64, (String, Vec<f64>)> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.subject_id)
            .or_insert_with(|| (row.subject_name, Vec::new()))
            .1
            .push(row.score);
    }

    let mut stats: Vec<SubjectScoreStats> = grouped
        .into_iter()
        .map(|(subject_id, (subject_name, mut scores))| {
            scores.sort_by(f64::total_cmp);
            let count = scores.len();
            SubjectScoreStats {
                subject_id,
                subject_name,
                count: count as u64,
                min: scores[0],
                q1: quantile(&scores, 0.25),
                median: quantile(&scores, 0.5),
                q3: quantile(&scores, 0.75),
                max: scores[count - 1],
                mean: scores.iter().sum::<f64>() / count as f64,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        a.subject_name
            .cmp(&b.subject_name)
            .then(a.subject_id.cmp(&b.subject_id))
    });
    stats
}

/// 统计窗口起点：今天往前 `window_days` 天（含今天）
pub fn window_start(today: NaiveDate, window_days: i64) -> NaiveDate {
    today - Duration::days(window_days.max(0))
}

/// 按班级的加权出勤率，未分班学生归为一组；按出勤率降序
pub fn attendance_rates(
    marks: &[AttendanceMark],
    weights: &AttendanceWeights,
) -> Vec<ClassAttendanceRate> {
    let mut grouped: HashMap<Option<i64>, (Option<String>, f64, u64)> = HashMap::new();
    for mark in marks {
        let entry = grouped
            .entry(mark.class_id)
            .or_insert_with(|| (mark.class_name.clone(), 0.0, 0));
        entry.1 += weights.weight(mark.status);
        entry.2 += 1;
    }

    let mut rates: Vec<ClassAttendanceRate> = grouped
        .into_iter()
        .map(|(class_id, (class_name, total, count))| ClassAttendanceRate {
            class_id,
            class_name,
            rate: total / count as f64,
            marks: count,
        })
        .collect();

    rates.sort_by(|a, b| {
        b.rate
            .total_cmp(&a.rate)
            .then_with(|| a.class_name.cmp(&b.class_name))
    });
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;

    fn mark(class_id: Option<i64>, status: AttendanceStatus) -> AttendanceMark {
        AttendanceMark {
            class_id,
            class_name: class_id.map(|id| format!("Turma {id}")),
            status,
        }
    }

    #[test]
    fn test_histogram_edges() {
        let bins = score_histogram([0.0, 0.99, 1.0, 9.5, 10.0, 11.0]);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 1);
        // 10 落在最后一个区间
        assert_eq!(bins[9].count, 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 5);
        assert_eq!((bins[9].lower, bins[9].upper), (9.0, 10.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
    }

    #[test]
    fn test_scores_by_subject_sorted_by_name() {
        let rows = vec![
            SubjectScore { subject_id: 2, subject_name: "Português".into(), score: 6.0 },
            SubjectScore { subject_id: 1, subject_name: "Matemática".into(), score: 8.0 },
            SubjectScore { subject_id: 2, subject_name: "Português".into(), score: 8.0 },
            SubjectScore { subject_id: 1, subject_name: "Matemática".into(), score: 4.0 },
        ];
        let stats = scores_by_subject(rows);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].subject_name, "Matemática");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].min, 4.0);
        assert_eq!(stats[0].max, 8.0);
        assert_eq!(stats[0].median, 6.0);
        assert_eq!(stats[0].mean, 6.0);
        assert_eq!(stats[1].mean, 7.0);
    }

    #[test]
    fn test_attendance_rate_weighted() {
        let weights = AttendanceWeights::default();
        let marks = vec![
            mark(Some(1), AttendanceStatus::Present),
            mark(Some(1), AttendanceStatus::Present),
            mark(Some(1), AttendanceStatus::Justified),
            mark(None, AttendanceStatus::Present),
            mark(Some(2), AttendanceStatus::Absent),
        ];

        let rates = attendance_rates(&marks, &weights);
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].class_id, None);
        assert_eq!(rates[0].rate, 1.0);
        assert_eq!(rates[1].class_id, Some(1));
        assert!((rates[1].rate - (1.0 + 1.0 + 0.8) / 3.0).abs() < 1e-9);
        assert_eq!(rates[1].marks, 3);
        assert_eq!(rates[2].rate, 0.0);
    }

    #[test]
    fn test_window_start() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(window_start(today, 30), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
