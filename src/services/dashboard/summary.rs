use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use super::{
    DASHBOARD_SUMMARY, DashboardService,
    stats::{attendance_rates, score_histogram, scores_by_subject, window_start},
};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode, attendance::entities::AttendanceWeights,
    dashboard::responses::DashboardSummary,
};
use crate::services::storage_error_response;
use crate::storage::Storage;

/// 汇总计数、成绩分布与近期出勤
pub async fn build_summary(
    storage: &Arc<dyn Storage>,
    today: NaiveDate,
    window_days: i64,
) -> Result<DashboardSummary> {
    let config = AppConfig::get();

    let counts = storage.count_entities().await?;
    let scores = storage.list_subject_scores().await?;
    let marks = storage
        .list_attendance_marks_since(window_start(today, window_days))
        .await?;

    Ok(DashboardSummary {
        counts,
        score_histogram: score_histogram(scores.iter().map(|s| s.score)),
        scores_by_subject: scores_by_subject(scores),
        attendance_by_class: attendance_rates(&marks, &AttendanceWeights::from(&config.attendance)),
        attendance_window_days: window_days,
    })
}

pub async fn get_summary(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let today = chrono::Local::now().date_naive();
    let window_days = AppConfig::get().attendance.window_days;

    let result = service
        .get_cache(request)
        .get_or_load(DASHBOARD_SUMMARY, &(today, window_days), || {
            build_summary(&storage, today, window_days)
        })
        .await;

    match result {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Dashboard summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to build dashboard summary",
        )),
    }
}
