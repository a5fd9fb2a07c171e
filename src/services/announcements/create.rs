use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnnouncementService;
use crate::cache::CachedTable;
use crate::middlewares::RequestProfile;
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::{entities::NewAnnouncement, requests::CreateAnnouncementRequest},
};
use crate::services::storage_error_response;

pub async fn create_announcement(
    service: &AnnouncementService,
    req: CreateAnnouncementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let title = req.title.trim();
    let message = req.message.trim();

    if title.is_empty() || message.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AnnouncementInvalid,
            "Title and message are required",
        )));
    }

    let Some(issuer_id) = RequestProfile::extract_user_id(request) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileInvalid,
            "No profile selected",
        )));
    };

    let storage = service.get_storage(request);
    let announcement = NewAnnouncement {
        title: title.to_string(),
        message: message.to_string(),
        audience: req.audience,
        issuer_id,
    };

    match storage.create_announcement(announcement).await {
        Ok(announcement) => {
            service
                .get_cache(request)
                .invalidate(&[CachedTable::Announcements]);
            info!(
                "Announcement {} posted by user {}",
                announcement.id, announcement.issuer_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                announcement,
                "Announcement posted",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::AnnouncementFailed,
            "Failed to post announcement",
        )),
    }
}
