//! 缓存模块
//!
//! `ObjectCache` 是底层键值缓存（moka），`QueryCache` 在其上按查询指纹、
//! 参数与表版本号缓存读取结果。

pub mod object_cache;
pub mod query;
pub mod traits;

pub use object_cache::MokaCacheWrapper;
pub use query::{CachedQuery, CachedTable, QueryCache};
pub use traits::{CacheResult, ObjectCache};
