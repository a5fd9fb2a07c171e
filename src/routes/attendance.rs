use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListParams, RecordAttendanceRequest, RollCallRequest,
};
use crate::services::AttendanceService;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// HTTP处理程序
pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(body.into_inner(), &req)
        .await
}

// 点名
pub async fn record_roll_call(
    req: HttpRequest,
    body: web::Json<RollCallRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_roll_call(body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequestProfile)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(web::post().to(record_attendance)),
            )
            .route("/roll-call", web::post().to(record_roll_call)),
    );
}
