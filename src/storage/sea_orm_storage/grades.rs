//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::grades::{self, ActiveModel, Column, Entity as Grades};
use crate::entity::{students, subjects};
use crate::errors::{Result, SchoolDeskError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    dashboard::entities::SubjectScore,
    grades::{
        entities::{Grade, GradeSheetBaseline, GradeSheetEntry, GradeView},
        requests::{GradeListParams, GradeSheetQuery},
        responses::GradeListResponse,
        sheet::{GradeSheet, GradeSheetSummary, SheetChange, StoredScore},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{debug, warn};

#[derive(Debug, FromQueryResult)]
struct GradeViewRow {
    id: i64,
    student_id: i64,
    student_name: String,
    subject_id: i64,
    subject_name: String,
    term: i32,
    score: f64,
    recorded_at: i64,
}

#[derive(Debug, FromQueryResult)]
struct SubjectScoreRow {
    subject_id: i64,
    subject_name: String,
    score: f64,
}

/// 事务内的写入失败统一视为核对失败；外键失效保留为引用错误
fn row_failure(context: &str, err: DbErr) -> SchoolDeskError {
    match SchoolDeskError::from_db_err(context, err) {
        SchoolDeskError::DatabaseOperation(msg) => SchoolDeskError::reconciliation(msg),
        other => other,
    }
}

impl SeaOrmStorage {
    /// 按成绩表核对成绩
    ///
    /// 校验失败时不写入任何数据；任一行写入失败则整张表回滚。
    pub async fn reconcile_grade_sheet_impl(&self, sheet: &GradeSheet) -> Result<GradeSheetSummary> {
        sheet.validate()?;

        let student_ids = sheet.student_ids();
        if student_ids.is_empty() {
            return Ok(GradeSheetSummary::default());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::apply_grade_sheet(&txn, sheet, &student_ids).await {
            Ok(summary) => {
                txn.commit()
                    .await
                    .map_err(|e| row_failure("提交成绩表失败", e))?;
                debug!(
                    "Grade sheet applied: subject={}, term={}, {:?}",
                    sheet.subject_id, sheet.term, summary
                );
                Ok(summary)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("成绩表回滚失败: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn apply_grade_sheet<C: ConnectionTrait>(
        conn: &C,
        sheet: &GradeSheet,
        student_ids: &[i64],
    ) -> Result<GradeSheetSummary> {
        let stored = Self::load_stored_scores(conn, sheet, student_ids).await?;
        let plan = sheet.plan(&stored);
        Self::apply_sheet_plan(conn, sheet, &plan).await?;
        Ok(GradeSheetSummary::from_plan(&plan))
    }

    async fn load_stored_scores<C: ConnectionTrait>(
        conn: &C,
        sheet: &GradeSheet,
        student_ids: &[i64],
    ) -> Result<HashMap<i64, StoredScore>> {
        let stored = Grades::find()
            .filter(Column::SubjectId.eq(sheet.subject_id))
            .filter(Column::Term.eq(sheet.term))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .all(conn)
            .await
            .map_err(|e| row_failure("读取现有成绩失败", e))?
            .into_iter()
            .map(|m| {
                (
                    m.student_id,
                    StoredScore {
                        grade_id: m.id,
                        score: m.score,
                    },
                )
            })
            .collect();

        Ok(stored)
    }

    async fn apply_sheet_plan<C: ConnectionTrait>(
        conn: &C,
        sheet: &GradeSheet,
        plan: &[SheetChange],
    ) -> Result<()> {
        let now = Utc::now().timestamp();

        for change in plan {
            match *change {
                SheetChange::Insert { student_id, score } => {
                    Self::upsert_grade(conn, student_id, sheet.subject_id, sheet.term, score, now)
                        .await?;
                }
                SheetChange::Update {
                    grade_id,
                    student_id,
                    score,
                } => {
                    let result = Grades::update_many()
                        .col_expr(Column::Score, Expr::value(score))
                        .col_expr(Column::UpdatedAt, Expr::value(now))
                        .filter(Column::Id.eq(grade_id))
                        .exec(conn)
                        .await
                        .map_err(|e| row_failure("更新成绩失败", e))?;

                    // 读取后该行已被并发删除，改为插入
                    if result.rows_affected == 0 {
                        Self::upsert_grade(
                            conn,
                            student_id,
                            sheet.subject_id,
                            sheet.term,
                            score,
                            now,
                        )
                        .await?;
                    }
                }
                SheetChange::Delete { grade_id, .. } => {
                    Grades::delete_by_id(grade_id)
                        .exec(conn)
                        .await
                        .map_err(|e| row_failure("删除成绩失败", e))?;
                }
                SheetChange::Unchanged { .. } => {}
            }
        }

        Ok(())
    }

    /// INSERT ... ON CONFLICT (student_id, subject_id, term) DO UPDATE
    async fn upsert_grade<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        subject_id: i64,
        term: i32,
        score: f64,
        now: i64,
    ) -> Result<()> {
        let model = ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            term: Set(term),
            score: Set(score),
            recorded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Grades::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::SubjectId, Column::Term])
                    .update_columns([Column::Score, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| row_failure("写入成绩失败", e))?;

        Ok(())
    }

    /// 成绩表初始数据：班级学生（按姓名）及其在该科目学期的成绩
    pub async fn get_grade_sheet_baseline_impl(
        &self,
        query: GradeSheetQuery,
    ) -> Result<GradeSheetBaseline> {
        let roster = students::Entity::find()
            .filter(students::Column::ClassId.eq(query.class_id))
            .order_by_asc(students::Column::FullName)
            .order_by_asc(students::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询班级学生失败: {e}")))?;

        let scores: HashMap<i64, f64> = if roster.is_empty() {
            HashMap::new()
        } else {
            Grades::find()
                .filter(Column::SubjectId.eq(query.subject_id))
                .filter(Column::Term.eq(query.term))
                .filter(Column::StudentId.is_in(roster.iter().map(|s| s.id)))
                .all(&self.db)
                .await
                .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩失败: {e}")))?
                .into_iter()
                .map(|g| (g.student_id, g.score))
                .collect()
        };

        Ok(GradeSheetBaseline {
            class_id: query.class_id,
            subject_id: query.subject_id,
            term: query.term,
            rows: roster
                .into_iter()
                .map(|s| GradeSheetEntry {
                    score: scores.get(&s.id).copied(),
                    student_id: s.id,
                    student_name: s.full_name,
                })
                .collect(),
        })
    }

    /// 最近成绩（分页，最新在前）
    pub async fn list_recent_grades_impl(&self, query: GradeListParams) -> Result<GradeListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Grades::find()
            .select_only()
            .column(Column::Id)
            .column(Column::StudentId)
            .column(Column::SubjectId)
            .column(Column::Term)
            .column(Column::Score)
            .column(Column::RecordedAt)
            .column_as(students::Column::FullName, "student_name")
            .column_as(subjects::Column::Name, "subject_name")
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def());

        if let Some(class_id) = query.class_id {
            select = select.filter(students::Column::ClassId.eq(class_id));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term));
        }

        let paginator = select
            .order_by_desc(Column::RecordedAt)
            .order_by_desc(Column::Id)
            .into_model::<GradeViewRow>()
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: rows
                .into_iter()
                .map(|r| GradeView {
                    id: r.id,
                    student_id: r.student_id,
                    student_name: r.student_name,
                    subject_id: r.subject_id,
                    subject_name: r.subject_name,
                    term: r.term,
                    score: r.score,
                    recorded_at: DateTime::<Utc>::from_timestamp(r.recorded_at, 0)
                        .unwrap_or_default(),
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 通过 (学生, 科目, 学期) 获取成绩
    pub async fn find_grade_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        term: i32,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Term.eq(term))
            .one(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 全部成绩及其科目名
    pub async fn list_subject_scores_impl(&self) -> Result<Vec<SubjectScore>> {
        let rows = Grades::find()
            .select_only()
            .column(Column::SubjectId)
            .column_as(subjects::Column::Name, "subject_name")
            .column(Column::Score)
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .into_model::<SubjectScoreRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询成绩统计失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| SubjectScore {
                subject_id: r.subject_id,
                subject_name: r.subject_name,
                score: r.score,
            })
            .collect())
    }
}
