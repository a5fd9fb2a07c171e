//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schooldesk_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolDeskError {
            $($variant(String),)*
        }

        impl SchoolDeskError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolDeskError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolDeskError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolDeskError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolDeskError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolDeskError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schooldesk_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Unique Constraint Conflict"),
    InvalidReference("E008", "Invalid Reference"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Io("E011", "IO Error"),
    Reconciliation("E012", "Grade Sheet Reconciliation Error"),
}

impl SchoolDeskError {
    /// 按存储层错误类别归类：唯一约束冲突、外键引用失效，其余视为数据库操作错误
    pub fn from_db_err(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolDeskError::conflict(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolDeskError::invalid_reference(format!("{context}: {detail}"))
            }
            _ => SchoolDeskError::database_operation(format!("{context}: {err}")),
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolDeskError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolDeskError {
    fn from(err: DbErr) -> Self {
        SchoolDeskError::from_db_err("database error", err)
    }
}

impl From<std::io::Error> for SchoolDeskError {
    fn from(err: std::io::Error) -> Self {
        SchoolDeskError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolDeskError {
    fn from(err: serde_json::Error) -> Self {
        SchoolDeskError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolDeskError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolDeskError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolDeskError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolDeskError::database_operation("test").code(), "E004");
        assert_eq!(SchoolDeskError::validation("test").code(), "E005");
        assert_eq!(SchoolDeskError::conflict("test").code(), "E007");
        assert_eq!(SchoolDeskError::reconciliation("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolDeskError::invalid_reference("test").error_type(),
            "Invalid Reference"
        );
        assert_eq!(
            SchoolDeskError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolDeskError::validation("score out of range");
        assert_eq!(err.message(), "score out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolDeskError::conflict("subject name already exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Unique Constraint Conflict"));
        assert!(formatted.contains("subject name already exists"));
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err = SchoolDeskError::from_db_err("load grades", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E004");
        assert!(err.message().starts_with("load grades"));
    }

    #[test]
    fn test_from_io_error() {
        let err: SchoolDeskError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml").into();
        assert_eq!(err.code(), "E011");
    }
}
