use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::cache::CachedTable;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        requests::{RecordAttendanceRequest, RollCallRequest},
        responses::RollCallResponse,
    },
};
use crate::services::storage_error_response;

pub async fn record_attendance(
    service: &AttendanceService,
    req: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.record_attendance(req).await {
        Ok(record) => {
            service.get_cache(request).invalidate(&[CachedTable::Attendance]);
            Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Attendance saved")))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::AttendanceFailed,
            "Failed to save attendance",
        )),
    }
}

pub async fn record_roll_call(
    service: &AttendanceService,
    req: RollCallRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if req.marks.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "Roll call must contain at least one mark",
        )));
    }

    let storage = service.get_storage(request);
    let subject_id = req.subject_id;
    let lesson_date = req.lesson_date;

    match storage.record_roll_call(req).await {
        Ok(recorded) => {
            service.get_cache(request).invalidate(&[CachedTable::Attendance]);
            info!(
                "Roll call saved: subject={}, date={}, marks={}",
                subject_id, lesson_date, recorded
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RollCallResponse { recorded },
                "Roll call saved",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::AttendanceFailed,
            "Failed to save roll call",
        )),
    }
}
