use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色（也用作公告受众标签）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub enum UserRole {
    Manager,  // 学校管理者
    Teacher,  // 教师
    Guardian, // 学生家长 / 监护人
}

impl UserRole {
    pub const MANAGER: &'static str = "manager";
    pub const TEACHER: &'static str = "teacher";
    pub const GUARDIAN: &'static str = "guardian";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Manager => Self::MANAGER,
            UserRole::Teacher => Self::TEACHER,
            UserRole::Guardian => Self::GUARDIAN,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid role: '{s}'. supported roles: manager, teacher, guardian"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            UserRole::MANAGER => Ok(UserRole::Manager),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::GUARDIAN => Ok(UserRole::Guardian),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 当前请求所选的档案（角色 + 用户），仅作为请求范围内的上下文，不是身份凭证
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct SelectedProfile {
    pub role: UserRole,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!(" guardian ".parse::<UserRole>(), Ok(UserRole::Guardian));
        assert!("responsavel".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_round_trip() {
        let json = serde_json::to_string(&UserRole::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        let back: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserRole::Manager);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            name: "Ana".into(),
            email: "ana@escola.br".into(),
            password_hash: "$argon2id$secret".into(),
            role: UserRole::Manager,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
