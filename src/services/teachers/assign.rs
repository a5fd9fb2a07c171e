use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::cache::CachedTable;
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::requests::AssignTeacherRequest,
    users::entities::UserRole,
};
use crate::services::storage_error_response;

pub async fn assign_teacher(
    service: &TeacherService,
    req: AssignTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只有教师角色的用户可以被指派
    match storage.get_user_by_id(req.teacher_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "User is not a teacher",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ReferenceNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(storage_error_response(
                e,
                ErrorCode::AssignmentCreationFailed,
                "Failed to look up teacher",
            ));
        }
    }

    match storage.assign_teacher(req).await {
        Ok(assignment) => {
            service
                .get_cache(request)
                .invalidate(&[CachedTable::TeacherAssignments]);
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "任课指派成功")))
        }
        Err(SchoolDeskError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AssignmentAlreadyExists,
                "Teacher is already assigned to this class and subject",
            ),
        )),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::AssignmentCreationFailed,
            "Teacher assignment failed",
        )),
    }
}
