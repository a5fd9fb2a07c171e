use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{Result, SchoolDeskError};
use crate::models::{
    PaginationInfo,
    announcements::{
        entities::{Announcement, NewAnnouncement},
        requests::AnnouncementListQuery,
        responses::AnnouncementListResponse,
    },
    common::pagination::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 发布公告
    pub async fn create_announcement_impl(&self, req: NewAnnouncement) -> Result<Announcement> {
        let model = ActiveModel {
            title: Set(req.title),
            message: Set(req.message),
            audience: Set(req.audience.map(|a| a.to_string())),
            issuer_id: Set(req.issuer_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolDeskError::from_db_err("发布公告失败", e))?;

        Ok(result.into_announcement())
    }

    /// 分页列出公告（最新在前）
    ///
    /// 指定受众时同时返回面向全体的公告。
    pub async fn list_announcements_with_pagination_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Announcements::find();

        if let Some(audience) = query.audience {
            select = select.filter(
                Condition::any()
                    .add(Column::Audience.eq(audience.to_string()))
                    .add(Column::Audience.is_null()),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询公告总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询公告页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(AnnouncementListResponse {
            items: items.into_iter().map(|m| m.into_announcement()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
