pub mod stats;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CachedQuery, CachedTable, QueryCache};
use crate::storage::Storage;

// 仪表盘汇总依赖全部业务表
pub(crate) const DASHBOARD_SUMMARY: CachedQuery = CachedQuery::new(
    "dashboard.summary",
    &[
        CachedTable::Students,
        CachedTable::Classes,
        CachedTable::Subjects,
        CachedTable::Grades,
        CachedTable::Attendance,
        CachedTable::Announcements,
    ],
);

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    // 仪表盘汇总
    pub async fn get_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::get_summary(self, request).await
    }
}
