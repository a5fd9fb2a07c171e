//! 统计与维护操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Announcements, Classes, Students, Subjects};
use crate::errors::{Result, SchoolDeskError};
use crate::models::dashboard::responses::EntityCounts;
use migration::{Migrator, MigratorTrait};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use tracing::warn;

impl SeaOrmStorage {
    /// 各类记录数
    pub async fn count_entities_impl(&self) -> Result<EntityCounts> {
        let count_err = |e: DbErr| SchoolDeskError::database_operation(format!("统计记录数失败: {e}"));

        Ok(EntityCounts {
            students: Students::find().count(&self.db).await.map_err(count_err)?,
            classes: Classes::find().count(&self.db).await.map_err(count_err)?,
            subjects: Subjects::find().count(&self.db).await.map_err(count_err)?,
            announcements: Announcements::find().count(&self.db).await.map_err(count_err)?,
        })
    }

    /// 回滚全部迁移后重新执行，清空所有数据
    pub async fn reset_schema_impl(&self) -> Result<()> {
        warn!("正在重置数据库结构，所有数据将被删除");
        Migrator::refresh(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("重置数据库失败: {e}")))
    }
}
