//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `*FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换（经由纯数据的 `*Draft`，便于测试）

use leptos::prelude::*;
use promanager_shared::date::parse_date_input;
use promanager_shared::{
    ProjectRequest, RegisterRequest, Role, TaskRequest, TaskStatus, UpdateUserRequest, User,
};

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required(value: String, message: &'static str) -> Result<String, &'static str> {
    non_empty(value).ok_or(message)
}

// =========================================================
// 项目
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn into_request(self) -> Result<ProjectRequest, &'static str> {
        Ok(ProjectRequest {
            title: required(self.title, "Project title is required")?,
            description: non_empty(self.description),
        })
    }
}

#[derive(Clone, Copy)]
pub struct ProjectFormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl ProjectFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
    }

    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
        }
    }
}

// =========================================================
// 任务
// =========================================================

/// 任务表单的原始输入（下拉框和日期框的值均为字符串）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub assigned_user_id: String,
    pub due_date: String,
}

impl TaskDraft {
    /// 转换为创建请求；新任务总是以 `TODO` 状态创建
    pub fn into_request(self) -> Result<TaskRequest, &'static str> {
        let title = required(self.title, "Task title is required")?;
        let project_id = required(self.project_id, "Select a project")?
            .parse()
            .map_err(|_| "Select a project")?;
        let assigned_user_id = non_empty(self.assigned_user_id)
            .map(|id| id.parse().map_err(|_| "Select a valid assignee"))
            .transpose()?;
        let due_date = parse_date_input(&self.due_date).map_err(|_| "Enter a valid due date")?;

        Ok(TaskRequest {
            title,
            description: non_empty(self.description),
            project_id,
            assigned_user_id,
            status: Some(TaskStatus::Todo),
            due_date,
        })
    }
}

#[derive(Clone, Copy)]
pub struct TaskFormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub project_id: RwSignal<String>,
    pub assigned_user_id: RwSignal<String>,
    pub due_date: RwSignal<String>,
}

impl TaskFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            project_id: RwSignal::new(String::new()),
            assigned_user_id: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
        }
    }

    /// 项目固定的表单（项目看板中的创建对话框）
    pub fn for_project(project_id: u64) -> Self {
        let state = Self::new();
        state.project_id.set(project_id.to_string());
        state
    }

    /// 重置表单；`keep_project` 时保留所选项目
    pub fn reset(&self, keep_project: bool) {
        self.title.set(String::new());
        self.description.set(String::new());
        if !keep_project {
            self.project_id.set(String::new());
        }
        self.assigned_user_id.set(String::new());
        self.due_date.set(String::new());
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            project_id: self.project_id.get_untracked(),
            assigned_user_id: self.assigned_user_id.get_untracked(),
            due_date: self.due_date.get_untracked(),
        }
    }
}

// =========================================================
// 用户
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserDraft {
    pub fn into_register(self) -> Result<RegisterRequest, &'static str> {
        Ok(RegisterRequest {
            name: required(self.name, "Name is required")?,
            email: required(self.email, "Email is required")?,
            password: Some(self.password)
                .filter(|p| !p.is_empty())
                .ok_or("Password is required")?,
            role: self.role,
        })
    }

    /// 编辑时不修改密码
    pub fn into_update(self) -> Result<UpdateUserRequest, &'static str> {
        Ok(UpdateUserRequest {
            name: required(self.name, "Name is required")?,
            email: required(self.email, "Email is required")?,
            role: Some(self.role),
        })
    }
}

#[derive(Clone, Copy)]
pub struct UserFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role: RwSignal<Role>,
    /// 正在编辑的用户 id；`None` 表示新建
    pub editing: RwSignal<Option<u64>>,
}

impl UserFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            role: RwSignal::new(Role::User),
            editing: RwSignal::new(None),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.role.set(Role::User);
        self.editing.set(None);
    }

    /// 载入已有用户进行编辑
    pub fn edit(&self, user: &User) {
        self.name.set(user.name.clone());
        self.email.set(user.email.clone());
        self.password.set(String::new());
        self.role.set(user.role);
        self.editing.set(Some(user.id));
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            role: self.role.get_untracked(),
        }
    }
}
