pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{CachedQuery, CachedTable, QueryCache};
use crate::models::attendance::requests::{
    AttendanceListParams, RecordAttendanceRequest, RollCallRequest,
};
use crate::storage::Storage;

pub(crate) const CLASS_ATTENDANCE: CachedQuery = CachedQuery::new(
    "attendance.by_class_date",
    &[CachedTable::Attendance, CachedTable::Students, CachedTable::Subjects],
);

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 班级某日考勤
    pub async fn list_attendance(
        &self,
        query: AttendanceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    // 单条考勤
    pub async fn record_attendance(
        &self,
        req: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, req, request).await
    }

    // 点名
    pub async fn record_roll_call(
        &self,
        req: RollCallRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_roll_call(self, req, request).await
    }
}
