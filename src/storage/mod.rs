use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    announcements::{
        entities::{Announcement, NewAnnouncement},
        requests::AnnouncementListQuery,
        responses::AnnouncementListResponse,
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceView},
        requests::{AttendanceListParams, RecordAttendanceRequest, RollCallRequest},
    },
    classes::{entities::Class, requests::{ClassQueryParams, CreateClassRequest}},
    dashboard::{
        entities::{AttendanceMark, SubjectScore},
        responses::EntityCounts,
    },
    grades::{
        entities::{Grade, GradeSheetBaseline},
        requests::{GradeListParams, GradeSheetQuery},
        responses::GradeListResponse,
        sheet::{GradeSheet, GradeSheetSummary},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams},
        responses::StudentListResponse,
    },
    subjects::entities::Subject,
    teachers::{entities::TeacherAssignment, requests::AssignTeacherRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn list_classes(&self, query: ClassQueryParams) -> Result<Vec<Class>>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse>;

    /// 科目管理方法
    async fn create_subject(&self, name: &str) -> Result<Subject>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// 任课管理方法
    async fn assign_teacher(&self, req: AssignTeacherRequest) -> Result<TeacherAssignment>;
    // 教师任课的班级
    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 教师在某班级任课的科目
    async fn list_teacher_subjects(&self, teacher_id: i64, class_id: i64) -> Result<Vec<Subject>>;

    /// 成绩方法
    // 按成绩表核对并在同一事务中写入
    async fn reconcile_grade_sheet(&self, sheet: &GradeSheet) -> Result<GradeSheetSummary>;
    // 成绩表初始数据
    async fn get_grade_sheet_baseline(&self, query: GradeSheetQuery) -> Result<GradeSheetBaseline>;
    // 最近成绩
    async fn list_recent_grades(&self, query: GradeListParams) -> Result<GradeListResponse>;
    async fn find_grade(&self, student_id: i64, subject_id: i64, term: i32) -> Result<Option<Grade>>;
    // 全部成绩（带科目），用于统计
    async fn list_subject_scores(&self) -> Result<Vec<SubjectScore>>;

    /// 考勤方法
    async fn record_attendance(&self, req: RecordAttendanceRequest) -> Result<AttendanceRecord>;
    async fn record_roll_call(&self, req: RollCallRequest) -> Result<usize>;
    async fn list_attendance(&self, query: AttendanceListParams) -> Result<Vec<AttendanceView>>;
    // 某日期（含）以来的考勤，用于出勤率统计
    async fn list_attendance_marks_since(&self, since: NaiveDate) -> Result<Vec<AttendanceMark>>;

    /// 公告方法
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse>;

    /// 系统方法
    async fn count_entities(&self) -> Result<EntityCounts>;
    // 删除并重建全部表
    async fn reset_schema(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
