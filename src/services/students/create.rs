use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::cache::CachedTable;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_birth_date, validate_name};

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_name(&req.full_name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let today = chrono::Local::now().date_naive();
    if let Err(msg) = validate_birth_date(req.birth_date, today) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    req.full_name = req.full_name.trim().to_string();
    let storage = service.get_storage(request);

    match storage.create_student(req).await {
        Ok(student) => {
            service.get_cache(request).invalidate(&[CachedTable::Students]);
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "学生注册成功")))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::StudentCreationFailed,
            "Student creation failed",
        )),
    }
}
