//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub audience: Option<String>,
    pub issuer_id: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IssuerId",
        to = "super::users::Column::Id"
    )]
    Issuer,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issuer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_announcement(self) -> crate::models::announcements::entities::Announcement {
        use crate::models::announcements::entities::Announcement;
        use crate::models::users::entities::UserRole;
        use chrono::{DateTime, Utc};

        Announcement {
            id: self.id,
            title: self.title,
            message: self.message,
            // 无法识别的受众标签按全员公告处理
            audience: self.audience.and_then(|a| a.parse::<UserRole>().ok()),
            issuer_id: self.issuer_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
