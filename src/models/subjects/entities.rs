use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
}
