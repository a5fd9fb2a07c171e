use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TEACHER_CLASSES, TEACHER_SUBJECTS, TeacherService};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn list_teacher_classes(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = service
        .get_cache(request)
        .get_or_load(TEACHER_CLASSES, &teacher_id, || {
            storage.list_teacher_classes(teacher_id)
        })
        .await;

    match result {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Teacher classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve teacher classes",
        )),
    }
}

pub async fn list_teacher_subjects(
    service: &TeacherService,
    teacher_id: i64,
    class_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = service
        .get_cache(request)
        .get_or_load(TEACHER_SUBJECTS, &(teacher_id, class_id), || {
            storage.list_teacher_subjects(teacher_id, class_id)
        })
        .await;

    match result {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Teacher subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve teacher subjects",
        )),
    }
}
