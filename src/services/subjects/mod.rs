use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CachedQuery, CachedTable, QueryCache};
use crate::errors::SchoolDeskError;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::storage::Storage;
use crate::utils::validate::validate_name;

use super::storage_error_response;

pub(crate) const SUBJECTS: CachedQuery =
    CachedQuery::new("subjects.list", &[CachedTable::Subjects]);

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<QueryCache> {
        super::query_cache(request)
    }

    // 科目列表（按名称）
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let result = self
            .get_cache(request)
            .get_or_load(SUBJECTS, &(), || storage.list_subjects())
            .await;

        match result {
            Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                subjects,
                "Subject list retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response(
                e,
                ErrorCode::InternalServerError,
                "Failed to retrieve subject list",
            )),
        }
    }

    // 创建科目，名称唯一
    pub async fn create_subject(
        &self,
        req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_name(&req.name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }

        let storage = self.get_storage(request);

        match storage.create_subject(req.name.trim()).await {
            Ok(subject) => {
                self.get_cache(request).invalidate(&[CachedTable::Subjects]);
                Ok(HttpResponse::Created().json(ApiResponse::success(subject, "科目创建成功")))
            }
            Err(SchoolDeskError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
                ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject already exists"),
            )),
            Err(e) => Ok(storage_error_response(
                e,
                ErrorCode::SubjectCreationFailed,
                "Subject creation failed",
            )),
        }
    }
}
