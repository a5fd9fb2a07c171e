//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod attendance;
mod classes;
mod grades;
mod students;
mod subjects;
mod system;
mod teachers;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolDeskError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实例
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolDeskError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 单连接内存库，供存储层单元测试使用
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        Self::connect(&config).await.unwrap()
    }

    /// SQLite 专用连接（文件库启用 WAL 与 pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolDeskError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库只存在于单个连接中，连接池必须固定为 1 且不能回收
        let mut pool = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));
        pool = if in_memory {
            pool.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool.max_connections(config.pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| SchoolDeskError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolDeskError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolDeskError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
    classes::{
        entities::Class,
        requests::{ClassQueryParams, CreateClassRequest},
    },
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn list_classes(&self, query: ClassQueryParams) -> Result<Vec<Class>> {
        self.list_classes_impl(query).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    // 科目模块
    async fn create_subject(&self, name: &str) -> Result<Subject> {
        self.create_subject_impl(name).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    // 任课模块
    async fn assign_teacher(&self, req: AssignTeacherRequest) -> Result<TeacherAssignment> {
        self.assign_teacher_impl(req).await
    }

    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>> {
        self.list_teacher_classes_impl(teacher_id).await
    }

    async fn list_teacher_subjects(&self, teacher_id: i64, class_id: i64) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(teacher_id, class_id).await
    }

    // 成绩模块
    async fn reconcile_grade_sheet(&self, sheet: &GradeSheet) -> Result<GradeSheetSummary> {
        self.reconcile_grade_sheet_impl(sheet).await
    }

    async fn get_grade_sheet_baseline(&self, query: GradeSheetQuery) -> Result<GradeSheetBaseline> {
        self.get_grade_sheet_baseline_impl(query).await
    }

    async fn list_recent_grades(&self, query: GradeListParams) -> Result<GradeListResponse> {
        self.list_recent_grades_impl(query).await
    }

    async fn find_grade(&self, student_id: i64, subject_id: i64, term: i32) -> Result<Option<Grade>> {
        self.find_grade_impl(student_id, subject_id, term).await
    }

    async fn list_subject_scores(&self) -> Result<Vec<SubjectScore>> {
        self.list_subject_scores_impl().await
    }

    // 考勤模块
    async fn record_attendance(&self, req: RecordAttendanceRequest) -> Result<AttendanceRecord> {
        self.record_attendance_impl(req).await
    }

    async fn record_roll_call(&self, req: RollCallRequest) -> Result<usize> {
        self.record_roll_call_impl(req).await
    }

    async fn list_attendance(&self, query: AttendanceListParams) -> Result<Vec<AttendanceView>> {
        self.list_attendance_impl(query).await
    }

    async fn list_attendance_marks_since(&self, since: NaiveDate) -> Result<Vec<AttendanceMark>> {
        self.list_attendance_marks_since_impl(since).await
    }

    // 公告模块
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        self.create_announcement_impl(announcement).await
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(query).await
    }

    // 系统模块
    async fn count_entities(&self) -> Result<EntityCounts> {
        self.count_entities_impl().await
    }

    async fn reset_schema(&self) -> Result<()> {
        self.reset_schema_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("escola.db").unwrap(),
            "sqlite://escola.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
