use crate::cache::{MokaCacheWrapper, ObjectCache, QueryCache};
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const SEED_MANAGER_EMAIL: &str = "admin@schooldesk.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<QueryCache>,
}

/// 创建查询缓存
fn create_cache() -> Arc<QueryCache> {
    let config = AppConfig::get();

    if config.cache.cache_type != "moka" {
        warn!(
            "Cache backend '{}' is not supported, falling back to moka",
            config.cache.cache_type
        );
    }

    let backend: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new());
    Arc::new(QueryCache::new(backend, config.cache.default_ttl))
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理者账号
/// 如果数据库中没有任何用户，则创建一个 manager 账号
pub async fn seed_manager(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping manager seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default manager account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping manager seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated manager password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash manager password: {}, skipping manager seed", e);
            return;
        }
    };

    let manager = CreateUserRequest {
        name: "Administrator".to_string(),
        email: SEED_MANAGER_EMAIL.to_string(),
        password: password_hash,
        role: UserRole::Manager,
    };

    match storage.create_user(manager).await {
        Ok(user) => {
            info!(
                "Default manager account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create manager account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、默认账号和查询缓存
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理者账号（如果需要）
    seed_manager(&storage).await;

    let cache = create_cache();
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
