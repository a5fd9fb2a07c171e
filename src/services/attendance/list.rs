use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, CLASS_ATTENDANCE};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::AttendanceListParams, responses::AttendanceListResponse},
};
use crate::services::storage_error_response;

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = cache
        .get_or_load(CLASS_ATTENDANCE, &query, || {
            storage.list_attendance(query.clone())
        })
        .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse { items },
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve attendance",
        )),
    }
}
