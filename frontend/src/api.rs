//! REST API 客户端
//!
//! 每个后端端点对应一个方法。每次请求都会从持久化存储中重新读取 token，
//! 存在时附加 `Authorization: Bearer <token>`。没有刷新、重试或退避：
//! 失败原样返回给调用方。

use futures::future::join3;
use leptos::prelude::use_context;
use promanager_shared::protocol::{
    ApiRequest, CreateProject, CreateTask, DeleteProject, DeleteTask, DeleteUser, GetProject,
    ListProjectTasks, ListProjects, ListUserTasks, ListUsers, UpdateProject, UpdateTask,
    UpdateTaskStatus, UpdateUser,
};
use promanager_shared::{
    AuthResponse, BEARER_PREFIX, ErrorBody, HEADER_AUTHORIZATION, LoginRequest, Project,
    ProjectRequest, RegisterRequest, STORAGE_TOKEN_KEY, Task, TaskRequest, TaskStatus,
    UpdateUserRequest, User,
};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::{BrowserStorage, FetchHttpClient, HttpClient, HttpRequest, KeyValueStore};

/// 看板页一次加载的结果
#[derive(Debug)]
pub struct BoardLoad {
    pub board: ApiResult<(Project, Vec<Task>)>,
    /// 仅在请求了用户列表时为 `Some`
    pub users: Option<ApiResult<Vec<User>>>,
}

/// 浏览器环境下的客户端类型
pub type Api = ApiClient<FetchHttpClient, BrowserStorage>;

#[derive(Debug, Clone, Copy)]
pub struct ApiClient<H, S> {
    base_url: &'static str,
    http: H,
    storage: S,
}

impl Api {
    pub fn from_config(config: AppConfig) -> Self {
        Self::new(config.api_base_url, FetchHttpClient, BrowserStorage)
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}

impl<H: HttpClient, S: KeyValueStore> ApiClient<H, S> {
    pub fn new(base_url: &'static str, http: H, storage: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            http,
            storage,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 构建请求：序列化请求体并附加认证头
    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut http_req = HttpRequest::new(self.url(&req.path()), R::METHOD);

        if let Some(token) = self.storage.get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty()) {
            http_req = http_req.with_header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            );
        }

        if let Some(body) = req.body() {
            let json =
                serde_json_wasm::to_string(body).map_err(|e| ApiError::Build(e.to_string()))?;
            http_req = http_req.with_json_body(json);
        }

        Ok(http_req)
    }

    /// 发送任意端点请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http_req = self.build(req)?;
        let res = self.http.send(http_req).await?;

        if !res.ok() {
            let body = serde_json_wasm::from_str::<ErrorBody>(&res.body).ok();
            return Err(ApiError::Status {
                status: res.status,
                body,
            });
        }

        // 204 / 空响应体按 JSON null 处理，使 `()` 响应可以正常解析
        let text = res.body.trim();
        let text = if text.is_empty() { "null" } else { text };
        serde_json_wasm::from_str::<R::Response>(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // =====================================================
    // Auth
    // =====================================================

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthResponse> {
        self.call(credentials).await
    }

    pub async fn register(&self, registration: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.call(registration).await
    }

    // =====================================================
    // Users
    // =====================================================

    pub async fn get_users(&self) -> ApiResult<Vec<User>> {
        self.call(&ListUsers).await
    }

    /// 管理端创建用户复用注册端点
    pub async fn create_user(&self, registration: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.call(registration).await
    }

    pub async fn update_user(&self, id: u64, update: UpdateUserRequest) -> ApiResult<User> {
        self.call(&UpdateUser { id, update }).await
    }

    pub async fn delete_user(&self, id: u64) -> ApiResult<()> {
        self.call(&DeleteUser { id }).await
    }

    // =====================================================
    // Projects
    // =====================================================

    pub async fn get_projects(&self) -> ApiResult<Vec<Project>> {
        self.call(&ListProjects).await
    }

    pub async fn get_project(&self, id: u64) -> ApiResult<Project> {
        self.call(&GetProject { id }).await
    }

    pub async fn create_project(&self, project: ProjectRequest) -> ApiResult<Project> {
        self.call(&CreateProject(project)).await
    }

    pub async fn update_project(&self, id: u64, project: ProjectRequest) -> ApiResult<Project> {
        self.call(&UpdateProject { id, project }).await
    }

    pub async fn delete_project(&self, id: u64) -> ApiResult<()> {
        self.call(&DeleteProject { id }).await
    }

    // =====================================================
    // Tasks
    // =====================================================

    pub async fn get_tasks_by_project(&self, project_id: u64) -> ApiResult<Vec<Task>> {
        self.call(&ListProjectTasks { project_id }).await
    }

    pub async fn get_tasks_by_user(&self, user_id: u64) -> ApiResult<Vec<Task>> {
        self.call(&ListUserTasks { user_id }).await
    }

    pub async fn create_task(&self, task: TaskRequest) -> ApiResult<Task> {
        self.call(&CreateTask(task)).await
    }

    pub async fn update_task(&self, id: u64, task: TaskRequest) -> ApiResult<Task> {
        self.call(&UpdateTask { id, task }).await
    }

    pub async fn update_task_status(&self, id: u64, status: TaskStatus) -> ApiResult<Task> {
        self.call(&UpdateTaskStatus::new(id, status)).await
    }

    pub async fn delete_task(&self, id: u64) -> ApiResult<()> {
        self.call(&DeleteTask { id }).await
    }

    // =====================================================
    // 组合调用：修改后重新拉取
    // =====================================================

    /// 并发加载项目、任务以及（可选的）用户列表
    pub async fn load_board(&self, project_id: u64, include_users: bool) -> BoardLoad {
        let users = async {
            if include_users {
                Some(self.get_users().await)
            } else {
                None
            }
        };
        let (project, tasks, users) = join3(
            self.get_project(project_id),
            self.get_tasks_by_project(project_id),
            users,
        )
        .await;

        BoardLoad {
            board: project.and_then(|p| tasks.map(|t| (p, t))),
            users,
        }
    }

    /// 删除项目后返回最新的项目列表
    pub async fn delete_project_and_list(&self, id: u64) -> ApiResult<Vec<Project>> {
        self.delete_project(id).await?;
        self.get_projects().await
    }

    /// 创建任务后返回该项目最新的任务列表
    pub async fn create_task_and_list(&self, task: TaskRequest) -> ApiResult<Vec<Task>> {
        let project_id = task.project_id;
        self.create_task(task).await?;
        self.get_tasks_by_project(project_id).await
    }
}

#[cfg(test)]
mod tests;
