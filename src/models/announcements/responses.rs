use super::entities::Announcement;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct AnnouncementListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Announcement>,
}
