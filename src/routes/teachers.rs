use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teachers::requests::AssignTeacherRequest;
use crate::services::TeacherService;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// 分配任课
pub async fn assign_teacher(
    req: HttpRequest,
    body: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.assign(body.into_inner(), &req).await
}

// 教师任课的班级
pub async fn list_classes(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_classes(path.into_inner(), &req).await
}

// 教师在某班级任课的科目
pub async fn list_subjects(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (teacher_id, class_id) = path.into_inner();
    TEACHER_SERVICE
        .list_subjects(teacher_id, class_id, &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher-assignments")
            .wrap(middlewares::RequestProfile)
            .route("", web::post().to(assign_teacher)),
    );
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequestProfile)
            .route("/{teacher_id}/classes", web::get().to(list_classes))
            .route(
                "/{teacher_id}/classes/{class_id}/subjects",
                web::get().to(list_subjects),
            ),
    );
}
