//! 查询结果缓存
//!
//! 缓存键 = 查询指纹 + 参数 JSON + 该查询读取的各表版本号。
//! 写操作只递增它所修改的表的版本号，旧键随之失效，其余查询的缓存不受影响。

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{CacheResult, ObjectCache};
use crate::errors::Result;

/// 参与缓存失效的表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachedTable {
    Users,
    Classes,
    Students,
    Subjects,
    TeacherAssignments,
    Grades,
    Attendance,
    Announcements,
}

impl CachedTable {
    pub const ALL: [CachedTable; 8] = [
        CachedTable::Users,
        CachedTable::Classes,
        CachedTable::Students,
        CachedTable::Subjects,
        CachedTable::TeacherAssignments,
        CachedTable::Grades,
        CachedTable::Attendance,
        CachedTable::Announcements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CachedTable::Users => "users",
            CachedTable::Classes => "classes",
            CachedTable::Students => "students",
            CachedTable::Subjects => "subjects",
            CachedTable::TeacherAssignments => "teacher_assignments",
            CachedTable::Grades => "grades",
            CachedTable::Attendance => "attendance",
            CachedTable::Announcements => "announcements",
        }
    }
}

/// 可缓存查询的描述：指纹与读取的表
#[derive(Debug, Clone, Copy)]
pub struct CachedQuery {
    pub fingerprint: &'static str,
    pub reads: &'static [CachedTable],
}

impl CachedQuery {
    pub const fn new(fingerprint: &'static str, reads: &'static [CachedTable]) -> Self {
        Self { fingerprint, reads }
    }
}

pub struct QueryCache {
    backend: Arc<dyn ObjectCache>,
    generations: DashMap<CachedTable, u64>,
    ttl: u64,
}

impl QueryCache {
    pub fn new(backend: Arc<dyn ObjectCache>, ttl: u64) -> Self {
        Self {
            backend,
            generations: DashMap::new(),
            ttl,
        }
    }

    pub fn generation(&self, table: CachedTable) -> u64 {
        self.generations.get(&table).map(|g| *g).unwrap_or(0)
    }

    fn cache_key<P: Serialize>(&self, query: &CachedQuery, params: &P) -> Result<String> {
        let params = serde_json::to_string(params)?;
        let generations = query
            .reads
            .iter()
            .map(|t| format!("{}={}", t.as_str(), self.generation(*t)))
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("{}:{}:{}", query.fingerprint, params, generations))
    }

    /// 命中则直接返回缓存结果，否则执行 loader 并写入缓存
    ///
    /// 版本号在执行 loader 之前取得，加载期间发生的写操作会让这次写入的键立即过期。
    pub async fn get_or_load<T, P, F, Fut>(&self, query: CachedQuery, params: &P, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        P: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = self.cache_key(&query, params)?;

        if let CacheResult::Found(json) = self.backend.get_raw(&key).await {
            match serde_json::from_str::<T>(&json) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    self.backend.remove(&key).await;
                }
            }
        }

        let value = loader().await?;
        match serde_json::to_string(&value) {
            Ok(json) => self.backend.insert_raw(key, json, self.ttl).await,
            Err(e) => warn!("Failed to serialize query result for cache: {}", e),
        }
        Ok(value)
    }

    /// 递增给定表的版本号
    pub fn invalidate(&self, tables: &[CachedTable]) {
        for table in tables {
            *self.generations.entry(*table).or_insert(0) += 1;
        }
        debug!(
            "Query cache invalidated: {:?}",
            tables.iter().map(|t| t.as_str()).collect::<Vec<_>>()
        );
    }

    pub async fn invalidate_all(&self) {
        self.invalidate(&CachedTable::ALL);
        self.backend.invalidate_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::MokaCacheWrapper;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GRADES_QUERY: CachedQuery = CachedQuery::new("test.grades", &[CachedTable::Grades]);
    const SUBJECTS_QUERY: CachedQuery = CachedQuery::new("test.subjects", &[CachedTable::Subjects]);

    fn cache() -> QueryCache {
        QueryCache::new(Arc::new(MokaCacheWrapper::with_capacity(64, 60)), 60)
    }

    async fn load(cache: &QueryCache, query: CachedQuery, param: i64, calls: &AtomicUsize) -> i64 {
        cache
            .get_or_load(query, &param, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(param * 10)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_hit_skips_loader() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        assert_eq!(load(&cache, GRADES_QUERY, 1, &calls).await, 10);
        assert_eq!(load(&cache, GRADES_QUERY, 1, &calls).await, 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // 参数不同则是不同的键
        load(&cache, GRADES_QUERY, 2, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_written_tables() {
        let cache = cache();
        let grade_calls = AtomicUsize::new(0);
        let subject_calls = AtomicUsize::new(0);

        load(&cache, GRADES_QUERY, 1, &grade_calls).await;
        load(&cache, SUBJECTS_QUERY, 1, &subject_calls).await;

        cache.invalidate(&[CachedTable::Grades]);
        assert_eq!(cache.generation(CachedTable::Grades), 1);
        assert_eq!(cache.generation(CachedTable::Subjects), 0);

        load(&cache, GRADES_QUERY, 1, &grade_calls).await;
        load(&cache, SUBJECTS_QUERY, 1, &subject_calls).await;
        assert_eq!(grade_calls.load(Ordering::SeqCst), 2);
        assert_eq!(subject_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_error_is_not_cached() {
        let cache = cache();
        let result: Result<i64> = cache
            .get_or_load(GRADES_QUERY, &0, || async {
                Err(crate::errors::SchoolDeskError::database_operation("boom"))
            })
            .await;
        assert!(result.is_err());

        let calls = AtomicUsize::new(0);
        assert_eq!(load(&cache, GRADES_QUERY, 0, &calls).await, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
