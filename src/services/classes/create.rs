use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::cache::CachedTable;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};
use crate::services::storage_error_response;
use crate::utils::validate::{validate_academic_year, validate_name};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_name(&class_data.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Err(msg) = validate_academic_year(class_data.academic_year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    class_data.name = class_data.name.trim().to_string();
    let storage = service.get_storage(request);

    match storage.create_class(class_data).await {
        Ok(class) => {
            service.get_cache(request).invalidate(&[CachedTable::Classes]);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "班级创建成功")))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::ClassCreationFailed,
            "Class creation failed",
        )),
    }
}
