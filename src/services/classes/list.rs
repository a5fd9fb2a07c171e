use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CLASSES, ClassService};
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{requests::ClassQueryParams, responses::ClassListResponse},
};
use crate::services::storage_error_response;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = cache
        .get_or_load(CLASSES, &query, || storage.list_classes(query.clone()))
        .await;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve class list",
        )),
    }
}
