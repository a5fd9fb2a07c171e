use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{STUDENTS, StudentService};
use crate::models::{ApiResponse, ErrorCode, students::requests::StudentListParams};
use crate::services::storage_error_response;

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = cache
        .get_or_load(STUDENTS, &query, || {
            storage.list_students_with_pagination(query.clone())
        })
        .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve student list",
        )),
    }
}
