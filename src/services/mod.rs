pub mod announcements;
pub mod attendance;
pub mod classes;
pub mod dashboard;
pub mod grades;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use announcements::AnnouncementService;
pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{error, warn};

use crate::cache::QueryCache;
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, ErrorCode};

/// 从 app data 获取查询缓存
pub(crate) fn query_cache(request: &HttpRequest) -> Arc<QueryCache> {
    request
        .app_data::<actix_web::web::Data<Arc<QueryCache>>>()
        .expect("QueryCache not found in app data")
        .get_ref()
        .clone()
}

/// 将存储层错误映射为 HTTP 响应
///
/// 校验失败与引用失效返回 400，唯一约束冲突返回 409，其余错误记录日志后返回 500。
pub(crate) fn storage_error_response(
    err: SchoolDeskError,
    failure_code: ErrorCode,
    context: &str,
) -> HttpResponse {
    match err {
        SchoolDeskError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)),
        SchoolDeskError::InvalidReference(detail) => {
            warn!("{}: {}", context, detail);
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ReferenceNotFound,
                "Referenced record does not exist",
            ))
        }
        SchoolDeskError::Conflict(detail) => {
            warn!("{}: {}", context, detail);
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "Record already exists",
            ))
        }
        SchoolDeskError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(failure_code, context.to_string()))
        }
    }
}
