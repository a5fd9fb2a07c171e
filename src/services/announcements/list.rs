use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ANNOUNCEMENTS, AnnouncementService};
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::requests::{AnnouncementListParams, AnnouncementListQuery},
};
use crate::services::storage_error_response;

pub async fn list_announcements(
    service: &AnnouncementService,
    query: AnnouncementListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let list_query = AnnouncementListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        audience: query.audience,
    };

    let result = cache
        .get_or_load(ANNOUNCEMENTS, &list_query, || {
            storage.list_announcements_with_pagination(list_query.clone())
        })
        .await;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Announcements retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve announcements",
        )),
    }
}
