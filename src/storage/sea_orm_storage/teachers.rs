//! 任课关系存储操作

use super::SeaOrmStorage;
use crate::entity::teacher_assignments::{
    ActiveModel, Column as AssignmentColumn, Entity as TeacherAssignments,
};
use crate::entity::{classes, subjects};
use crate::errors::{Result, SchoolDeskError};
use crate::models::{
    classes::entities::Class,
    subjects::entities::Subject,
    teachers::{entities::TeacherAssignment, requests::AssignTeacherRequest},
};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 指派教师任课，三元组唯一
    pub async fn assign_teacher_impl(&self, req: AssignTeacherRequest) -> Result<TeacherAssignment> {
        let model = ActiveModel {
            teacher_id: Set(req.teacher_id),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
        };

        TeacherAssignments::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SchoolDeskError::from_db_err("指派任课失败", e))?;

        Ok(TeacherAssignment {
            teacher_id: req.teacher_id,
            class_id: req.class_id,
            subject_id: req.subject_id,
        })
    }

    /// 教师任课的班级
    pub async fn list_teacher_classes_impl(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let result = classes::Entity::find()
            .join(
                JoinType::InnerJoin,
                classes::Relation::TeacherAssignments.def(),
            )
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .distinct()
            .order_by_asc(classes::Column::Name)
            .order_by_asc(classes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询任课班级失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 教师在某班级任课的科目
    pub async fn list_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        class_id: i64,
    ) -> Result<Vec<Subject>> {
        let result = subjects::Entity::find()
            .join(
                JoinType::InnerJoin,
                subjects::Relation::TeacherAssignments.def(),
            )
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("查询任课科目失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }
}
