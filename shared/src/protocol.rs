use crate::{
    AuthResponse, LoginRequest, Project, ProjectRequest, RegisterRequest, Task, TaskRequest,
    TaskStatus, TaskStatusUpdate, UpdateUserRequest, User,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The JSON body sent with the request (`()` when there is none).
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the API base URL.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Also used by the admin screen to create users.
impl ApiRequest for RegisterRequest {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListUsers;

impl ApiRequest for ListUsers {
    type Body = ();
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: u64,
    pub update: UpdateUserRequest,
}

impl ApiRequest for UpdateUser {
    type Body = UpdateUserRequest;
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }

    fn body(&self) -> Option<&UpdateUserRequest> {
        Some(&self.update)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteUser {
    pub id: u64,
}

impl ApiRequest for DeleteUser {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

// =========================================================
// Projects
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListProjects;

impl ApiRequest for ListProjects {
    type Body = ();
    type Response = Vec<Project>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/projects".to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetProject {
    pub id: u64,
}

impl ApiRequest for GetProject {
    type Body = ();
    type Response = Project;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/projects/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateProject(pub ProjectRequest);

impl ApiRequest for CreateProject {
    type Body = ProjectRequest;
    type Response = Project;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/projects".to_string()
    }

    fn body(&self) -> Option<&ProjectRequest> {
        Some(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub id: u64,
    pub project: ProjectRequest,
}

impl ApiRequest for UpdateProject {
    type Body = ProjectRequest;
    type Response = Project;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/projects/{}", self.id)
    }

    fn body(&self) -> Option<&ProjectRequest> {
        Some(&self.project)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProject {
    pub id: u64,
}

impl ApiRequest for DeleteProject {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/projects/{}", self.id)
    }
}

// =========================================================
// Tasks
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListProjectTasks {
    pub project_id: u64,
}

impl ApiRequest for ListProjectTasks {
    type Body = ();
    type Response = Vec<Task>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/tasks/project/{}", self.project_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListUserTasks {
    pub user_id: u64,
}

impl ApiRequest for ListUserTasks {
    type Body = ();
    type Response = Vec<Task>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/tasks/user/{}", self.user_id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateTask(pub TaskRequest);

impl ApiRequest for CreateTask {
    type Body = TaskRequest;
    type Response = Task;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/tasks".to_string()
    }

    fn body(&self) -> Option<&TaskRequest> {
        Some(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub id: u64,
    pub task: TaskRequest,
}

impl ApiRequest for UpdateTask {
    type Body = TaskRequest;
    type Response = Task;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/tasks/{}", self.id)
    }

    fn body(&self) -> Option<&TaskRequest> {
        Some(&self.task)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateTaskStatus {
    pub id: u64,
    pub update: TaskStatusUpdate,
}

impl UpdateTaskStatus {
    pub fn new(id: u64, status: TaskStatus) -> Self {
        Self {
            id,
            update: TaskStatusUpdate { status },
        }
    }
}

impl ApiRequest for UpdateTaskStatus {
    type Body = TaskStatusUpdate;
    type Response = Task;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/tasks/{}/status", self.id)
    }

    fn body(&self) -> Option<&TaskStatusUpdate> {
        Some(&self.update)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteTask {
    pub id: u64,
}

impl ApiRequest for DeleteTask {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/tasks/{}", self.id)
    }
}
