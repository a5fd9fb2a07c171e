use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, RECENT_GRADES};
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeListParams};
use crate::services::storage_error_response;

pub async fn list_recent_grades(
    service: &GradeService,
    query: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = cache
        .get_or_load(RECENT_GRADES, &query, || {
            storage.list_recent_grades(query.clone())
        })
        .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve grades",
        )),
    }
}
