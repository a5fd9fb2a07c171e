use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::{
    requests::{GradeListParams, GradeSheetQuery},
    sheet::GradeSheet,
};
use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn list_recent_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_recent_grades(query.into_inner(), &req)
        .await
}

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_sheet(query.into_inner(), &req).await
}

pub async fn submit_sheet(
    req: HttpRequest,
    sheet: web::Json<GradeSheet>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.submit_sheet(sheet.into_inner(), &req).await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequestProfile)
            .route("", web::get().to(list_recent_grades))
            .service(
                web::resource("/sheet")
                    .route(web::get().to(get_sheet))
                    .route(web::put().to(submit_sheet)),
            ),
    );
}
