pub mod list;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CachedQuery, CachedTable, QueryCache};
use crate::models::grades::{
    requests::{GradeListParams, GradeSheetQuery},
    sheet::GradeSheet,
};
use crate::storage::Storage;

// 最近成绩
pub(crate) const RECENT_GRADES: CachedQuery = CachedQuery::new(
    "grades.recent",
    &[CachedTable::Grades, CachedTable::Students, CachedTable::Subjects],
);

// 成绩表初始数据
pub(crate) const SHEET_BASELINE: CachedQuery = CachedQuery::new(
    "grades.sheet_baseline",
    &[CachedTable::Grades, CachedTable::Students],
);

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 最近成绩列表
    pub async fn list_recent_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_recent_grades(self, query, request).await
    }

    // 成绩表初始数据
    pub async fn get_sheet(
        &self,
        query: GradeSheetQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, query, request).await
    }

    // 提交成绩表
    pub async fn submit_sheet(
        &self,
        sheet: GradeSheet,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sheet::submit_sheet(self, sheet, request).await
    }
}
