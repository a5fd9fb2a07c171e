//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{self, ActiveModel, Column, Entity as Attendance};
use crate::entity::{classes, students, subjects};
use crate::errors::{Result, SchoolDeskError};
use crate::models::{
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus, AttendanceView},
        requests::{AttendanceListParams, RecordAttendanceRequest, RollCallRequest},
    },
    dashboard::entities::AttendanceMark,
};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::warn;

#[derive(Debug, FromQueryResult)]
struct AttendanceViewRow {
    id: i64,
    student_id: i64,
    student_name: String,
    subject_id: i64,
    subject_name: String,
    lesson_date: NaiveDate,
    status: String,
}

#[derive(Debug, FromQueryResult)]
struct AttendanceMarkRow {
    class_id: Option<i64>,
    class_name: Option<String>,
    status: String,
}

/// 无法识别的状态只记录告警，该行不参与列表与出勤率
fn parse_status(attendance_id: Option<i64>, raw: &str) -> Option<AttendanceStatus> {
    match raw.parse::<AttendanceStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            warn!(
                "Skipping attendance row {:?} with unknown status '{}'",
                attendance_id, raw
            );
            None
        }
    }
}

impl SeaOrmStorage {
    /// INSERT ... ON CONFLICT (student_id, subject_id, lesson_date) DO UPDATE
    async fn upsert_attendance<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        subject_id: i64,
        lesson_date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<()> {
        let model = ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            lesson_date: Set(lesson_date),
            status: Set(status.to_string()),
            recorded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Attendance::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::SubjectId, Column::LessonDate])
                    .update_columns([Column::Status, Column::RecordedAt])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| SchoolDeskError::from_db_err("记录考勤失败", e))?;

        Ok(())
    }

    /// 记录单条考勤，重复记录覆盖状态
    pub async fn record_attendance_impl(
        &self,
        req: RecordAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        Self::upsert_attendance(
            &self.db,
            req.student_id,
            req.subject_id,
            req.lesson_date,
            req.status,
        )
        .await?;

        let result = Attendance::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::SubjectId.eq(req.subject_id))
            .filter(Column::LessonDate.eq(req.lesson_date))
            .one(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询考勤失败: {e}")))?
            .ok_or_else(|| SchoolDeskError::database_operation("考勤写入后未找到记录"))?;

        Ok(result.into_record())
    }

    /// 点名：同一事务中写入整班考勤
    pub async fn record_roll_call_impl(&self, req: RollCallRequest) -> Result<usize> {
        if req.marks.is_empty() {
            return Ok(0);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::apply_roll_call(&txn, &req).await {
            Ok(recorded) => {
                txn.commit()
                    .await
                    .map_err(|e| SchoolDeskError::database_operation(format!("提交点名失败: {e}")))?;
                Ok(recorded)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("点名回滚失败: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn apply_roll_call<C: ConnectionTrait>(conn: &C, req: &RollCallRequest) -> Result<usize> {
        for mark in &req.marks {
            Self::upsert_attendance(
                conn,
                mark.student_id,
                req.subject_id,
                req.lesson_date,
                mark.status,
            )
            .await?;
        }
        Ok(req.marks.len())
    }

    /// 某班级某日的考勤
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListParams,
    ) -> Result<Vec<AttendanceView>> {
        let mut select = Attendance::find()
            .select_only()
            .column(Column::Id)
            .column(Column::StudentId)
            .column(Column::SubjectId)
            .column(Column::LessonDate)
            .column(Column::Status)
            .column_as(students::Column::FullName, "student_name")
            .column_as(subjects::Column::Name, "subject_name")
            .join(JoinType::InnerJoin, attendance::Relation::Student.def())
            .join(JoinType::InnerJoin, attendance::Relation::Subject.def())
            .filter(students::Column::ClassId.eq(query.class_id))
            .filter(Column::LessonDate.eq(query.lesson_date));

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let rows = select
            .order_by_asc(students::Column::FullName)
            .order_by_asc(subjects::Column::Name)
            .into_model::<AttendanceViewRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                Some(AttendanceView {
                    status: parse_status(Some(r.id), &r.status)?,
                    id: r.id,
                    student_id: r.student_id,
                    student_name: r.student_name,
                    subject_id: r.subject_id,
                    subject_name: r.subject_name,
                    lesson_date: r.lesson_date,
                })
            })
            .collect())
    }

    /// 某日期（含）以来的考勤及学生所在班级
    pub async fn list_attendance_marks_since_impl(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<AttendanceMark>> {
        let rows = Attendance::find()
            .select_only()
            .column_as(students::Column::ClassId, "class_id")
            .column_as(classes::Column::Name, "class_name")
            .column(Column::Status)
            .join(JoinType::InnerJoin, attendance::Relation::Student.def())
            .join(JoinType::LeftJoin, students::Relation::Class.def())
            .filter(Column::LessonDate.gte(since))
            .into_model::<AttendanceMarkRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询出勤统计失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                Some(AttendanceMark {
                    status: parse_status(None, &r.status)?,
                    class_id: r.class_id,
                    class_name: r.class_name,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::Storage;

    #[test]
    fn test_unknown_status_is_rejected() {
        assert_eq!(parse_status(Some(1), "justified"), Some(AttendanceStatus::Justified));
        assert_eq!(parse_status(Some(2), "late"), None);
    }

    #[tokio::test]
    async fn test_unknown_status_rows_are_left_out() {
        let storage = SeaOrmStorage::in_memory().await;
        let class_id = storage
            .create_class(CreateClassRequest {
                name: "9C".to_string(),
                academic_year: 2025,
            })
            .await
            .unwrap()
            .id;
        let lesson_date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let subject_id = storage.create_subject("Ciências").await.unwrap().id;

        for name in ["Eva", "Filipe"] {
            let student_id = storage
                .create_student(CreateStudentRequest {
                    full_name: name.to_string(),
                    birth_date: NaiveDate::from_ymd_opt(2010, 2, 14).unwrap(),
                    class_id: Some(class_id),
                    guardian_id: None,
                })
                .await
                .unwrap()
                .id;
            let status = if name == "Eva" { "present" } else { "late" };
            Attendance::insert(ActiveModel {
                student_id: Set(student_id),
                subject_id: Set(subject_id),
                lesson_date: Set(lesson_date),
                status: Set(status.to_string()),
                recorded_at: Set(0),
                ..Default::default()
            })
            .exec_without_returning(&storage.db)
            .await
            .unwrap();
        }

        let marks = storage.list_attendance_marks_since_impl(lesson_date).await.unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].status, AttendanceStatus::Present);

        let views = storage
            .list_attendance_impl(AttendanceListParams {
                class_id,
                lesson_date,
                subject_id: None,
            })
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].student_name, "Eva");
    }
}
