use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
}
