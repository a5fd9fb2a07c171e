pub mod assign;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CachedQuery, CachedTable, QueryCache};
use crate::models::teachers::requests::AssignTeacherRequest;
use crate::storage::Storage;

pub(crate) const TEACHER_CLASSES: CachedQuery = CachedQuery::new(
    "teachers.classes",
    &[CachedTable::TeacherAssignments, CachedTable::Classes],
);

pub(crate) const TEACHER_SUBJECTS: CachedQuery = CachedQuery::new(
    "teachers.subjects",
    &[CachedTable::TeacherAssignments, CachedTable::Subjects],
);

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 指派任课
    pub async fn assign(
        &self,
        req: AssignTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_teacher(self, req, request).await
    }

    // 教师任课的班级
    pub async fn list_classes(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_classes(self, teacher_id, request).await
    }

    // 教师在某班级任课的科目
    pub async fn list_subjects(
        &self,
        teacher_id: i64,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_subjects(self, teacher_id, class_id, request).await
    }
}
