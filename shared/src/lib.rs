//! ProManager 共享模型
//!
//! 前端与 REST 后端之间的数据契约：
//! - 领域模型 (`Project`, `Task`, `User`, `Session`)
//! - 请求/响应 DTO
//! - `protocol`: 端点定义
//! - `date`: 截止日期的解析与展示

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_KEY: &str = "user";
pub const STORAGE_THEME_KEY: &str = "theme-v2";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务状态，同时也是看板的三列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// 看板列顺序
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// 线上格式 (`TODO` / `IN_PROGRESS` / `DONE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// 列标题
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    /// 徽章文本，下划线替换为空格
    pub fn badge_text(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub task_count: u32,
}

impl Project {
    /// 头像字母：负责人姓名首字母，缺省为 "U"
    pub fn owner_initial(&self) -> String {
        initial_of(self.owner_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub assigned_user_id: Option<u64>,
    #[serde(default)]
    pub assigned_user_name: Option<String>,
    #[serde(default)]
    pub assigned_user_email: Option<String>,
    #[serde(default)]
    pub assigned_user_role: Option<Role>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn initial(&self) -> String {
        initial_of(Some(&self.name))
    }
}

/// 当前登录身份，持久化在 `user` 键下
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn initial(&self) -> String {
        initial_of(Some(&self.name))
    }
}

impl From<&AuthResponse> for Session {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            id: auth.user_id,
            name: auth.name.clone(),
            email: auth.email.clone(),
            role: auth.role,
        }
    }
}

fn initial_of(name: Option<&str>) -> String {
    name.and_then(|n| n.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

// =========================================================
// 请求 / 响应 DTO
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl RegisterRequest {
    /// 注册成功后用同一组凭据登录
    pub fn credentials(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// 后端返回的结构化错误体：`{message}` 或 `{errors}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    /// 提取面向用户的消息；`message` 优先，其次是 `errors` 字段表
    pub fn describe(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.trim().is_empty()) {
            return Some(message.clone());
        }
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                errors
                    .iter()
                    .map(|(field, msg)| format!("{}: {}", field, msg))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthResponse {
        AuthResponse {
            token: "t1".to_string(),
            user_id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn session_from_auth_response() {
        let session = Session::from(&auth());
        assert_eq!(
            session,
            Session {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                role: Role::User,
            }
        );
        assert!(!session.is_admin());
    }

    #[test]
    fn auth_response_uses_camel_case() {
        let json = r#"{"token":"t1","userId":1,"name":"A","email":"a@b.com","role":"ADMIN"}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user_id, 1);
        assert!(parsed.role.is_admin());
    }

    #[test]
    fn task_ignores_unknown_fields_and_parses_due_date() {
        let json = r#"{
            "id": 7,
            "title": "Write docs",
            "description": null,
            "status": "IN_PROGRESS",
            "projectId": 3,
            "projectTitle": "Docs",
            "assignedUserId": 2,
            "assignedUserName": "B",
            "dueDate": "2024-05-01",
            "createdAt": "2024-04-01T10:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.project_id, Some(3));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(task.assigned_user_email, None);
    }

    #[test]
    fn project_task_count_defaults_to_zero() {
        let project: Project = serde_json::from_str(r#"{"id":1,"title":"P"}"#).unwrap();
        assert_eq!(project.task_count, 0);
        assert_eq!(project.owner_initial(), "U");
    }

    #[test]
    fn task_request_omits_empty_optionals() {
        let req = TaskRequest {
            title: "T".to_string(),
            description: None,
            project_id: 4,
            assigned_user_id: Some(9),
            status: Some(TaskStatus::Todo),
            due_date: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "T", "projectId": 4, "assignedUserId": 9, "status": "TODO"})
        );
    }

    #[test]
    fn status_parse_matches_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("BLOCKED"), None);
        assert_eq!(TaskStatus::InProgress.badge_text(), "IN PROGRESS");
    }

    #[test]
    fn error_body_prefers_message_over_errors() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message":"Task not found","errors":{"status":"must not be null"}}"#,
        )
        .unwrap();
        assert_eq!(body.describe().as_deref(), Some("Task not found"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"errors":{"status":"must not be null","title":"required"}}"#)
                .unwrap();
        assert_eq!(
            body.describe().as_deref(),
            Some("status: must not be null, title: required")
        );

        assert_eq!(ErrorBody::default().describe(), None);
    }
}
