use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, SHEET_BASELINE};
use crate::cache::CachedTable;
use crate::errors::SchoolDeskError;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        requests::GradeSheetQuery,
        sheet::{GradeSheet, TERMS},
    },
};
use crate::services::storage_error_response;

pub async fn get_sheet(
    service: &GradeService,
    query: GradeSheetQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !TERMS.contains(&query.term) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeSheetInvalid,
            format!("term must be between {} and {}", TERMS.start(), TERMS.end()),
        )));
    }

    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let result = cache
        .get_or_load(SHEET_BASELINE, &query, || {
            storage.get_grade_sheet_baseline(query.clone())
        })
        .await;

    match result {
        Ok(baseline) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            baseline,
            "Grade sheet retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to retrieve grade sheet",
        )),
    }
}

pub async fn submit_sheet(
    service: &GradeService,
    sheet: GradeSheet,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 在进入存储层前先拒绝非法成绩表
    if let Err(e) = sheet.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeSheetInvalid,
            e.message().to_string(),
        )));
    }

    let storage = service.get_storage(request);

    match storage.reconcile_grade_sheet(&sheet).await {
        Ok(summary) => {
            if summary.writes() > 0 {
                service.get_cache(request).invalidate(&[CachedTable::Grades]);
            }
            info!(
                "Grade sheet reconciled: subject={}, term={}, inserted={}, updated={}, deleted={}, unchanged={}",
                sheet.subject_id,
                sheet.term,
                summary.inserted,
                summary.updated,
                summary.deleted,
                summary.unchanged
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summary,
                "Grade sheet saved successfully",
            )))
        }
        Err(SchoolDeskError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeSheetInvalid, msg))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::GradeSheetFailed,
            "Failed to save grade sheet",
        )),
    }
}
