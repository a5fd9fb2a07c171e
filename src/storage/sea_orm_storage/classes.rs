use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{Result, SchoolDeskError};
use crate::models::classes::{
    entities::Class,
    requests::{ClassQueryParams, CreateClassRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let model = ActiveModel {
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolDeskError::from_db_err("创建班级失败", e))?;

        Ok(result.into_class())
    }

    /// 列出班级（按名称）
    pub async fn list_classes_impl(&self, query: ClassQueryParams) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        if let Some(year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }

        let classes = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }
}
