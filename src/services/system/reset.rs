use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, warn};

use super::SystemService;
use crate::cache::QueryCache;
use crate::errors::Result;
use crate::middlewares::RequestProfile;
use crate::models::{ApiResponse, ErrorCode};
use crate::runtime::lifetime::startup::seed_manager;
use crate::storage::Storage;

/// 删除并重建全部数据表，恢复默认管理者账号，最后清空查询缓存
///
/// 默认档案指向的用户随数据表一起被删除，需要重新创建。
pub async fn reset_database(storage: &Arc<dyn Storage>, cache: &QueryCache) -> Result<()> {
    storage.reset_schema().await?;
    seed_manager(storage).await;
    cache.invalidate_all().await;
    Ok(())
}

/// 仅在 `app.allow_reset = true` 时可用
pub async fn reset(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    if !service.get_config().app.allow_reset {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ResetDisabled,
            "Database reset is disabled",
        )));
    }

    warn!(
        "Database reset requested by profile user {:?}",
        RequestProfile::extract_user_id(request)
    );

    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    if let Err(e) = reset_database(&storage, &cache).await {
        error!("Database reset failed: {}", e);
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::ResetFailed,
            "Failed to reset database",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Database reset successfully")))
}
