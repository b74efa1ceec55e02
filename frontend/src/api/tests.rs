use super::*;
use crate::web::{MemoryStorage, MockHttpClient};
use futures::executor::block_on;
use promanager_shared::Role;
use promanager_shared::protocol::HttpMethod;

const BASE: &str = "http://api.test";

fn create_client() -> (ApiClient<MockHttpClient, MemoryStorage>, MockHttpClient, MemoryStorage) {
    let http = MockHttpClient::new();
    let storage = MemoryStorage::new();
    let api = ApiClient::new(BASE, http.clone(), storage.clone());
    (api, http, storage)
}

fn project_json(id: u64, title: &str) -> String {
    format!(r#"{{"id":{},"title":"{}","description":null,"ownerName":"Ada","taskCount":2}}"#, id, title)
}

// =========================================================
// 认证头
// =========================================================

#[test]
fn test_attaches_bearer_token_when_present() {
    let (api, http, storage) = create_client();
    storage.set(STORAGE_TOKEN_KEY, "abc");
    http.mock_response(HttpMethod::Get, "http://api.test/api/projects", 200, "[]");

    let projects = block_on(api.get_projects()).unwrap();
    assert!(projects.is_empty());

    let req = http.last_request().unwrap();
    assert_eq!(req.header("authorization"), Some("Bearer abc"));
    assert_eq!(req.body, None);
}

#[test]
fn test_omits_authorization_without_token() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Get, "http://api.test/api/projects", 200, "[]");

    block_on(api.get_projects()).unwrap();

    let req = http.last_request().unwrap();
    assert_eq!(req.header(HEADER_AUTHORIZATION), None);
}

#[test]
fn test_token_is_read_on_every_call() {
    let (api, http, storage) = create_client();
    http.mock_response(HttpMethod::Get, "http://api.test/api/projects", 200, "[]");

    storage.set(STORAGE_TOKEN_KEY, "first");
    block_on(api.get_projects()).unwrap();
    storage.set(STORAGE_TOKEN_KEY, "second");
    block_on(api.get_projects()).unwrap();

    let requests = http.requests.borrow();
    assert_eq!(requests[0].header(HEADER_AUTHORIZATION), Some("Bearer first"));
    assert_eq!(requests[1].header(HEADER_AUTHORIZATION), Some("Bearer second"));
}

// =========================================================
// 请求构建
// =========================================================

#[test]
fn test_login_posts_credentials() {
    let (api, http, _storage) = create_client();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/auth/login",
        200,
        r#"{"token":"t1","userId":7,"name":"Ada","email":"ada@example.com","role":"ADMIN"}"#,
    );

    let auth = block_on(api.login(&LoginRequest {
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    }))
    .unwrap();

    assert_eq!(auth.token, "t1");
    assert_eq!(auth.user_id, 7);
    assert_eq!(auth.role, Role::Admin);

    let req = http.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(
        req.body.as_deref(),
        Some(r#"{"email":"ada@example.com","password":"secret"}"#)
    );
}

#[test]
fn test_update_task_status_sends_patch() {
    let (api, http, _storage) = create_client();
    http.mock_response(
        HttpMethod::Patch,
        "http://api.test/api/tasks/12/status",
        200,
        r#"{"id":12,"title":"Write docs","status":"DONE"}"#,
    );

    let task = block_on(api.update_task_status(12, TaskStatus::Done)).unwrap();
    assert_eq!(task.status, TaskStatus::Done);

    let req = http.last_request().unwrap();
    assert_eq!(req.body.as_deref(), Some(r#"{"status":"DONE"}"#));
}

#[test]
fn test_create_task_omits_absent_fields() {
    let (api, http, _storage) = create_client();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/tasks",
        201,
        r#"{"id":3,"title":"Ship","projectId":1,"status":"TODO"}"#,
    );

    let task = block_on(api.create_task(TaskRequest {
        title: "Ship".to_string(),
        description: None,
        project_id: 1,
        assigned_user_id: None,
        status: Some(TaskStatus::Todo),
        due_date: None,
    }))
    .unwrap();
    assert_eq!(task.project_id, Some(1));

    let req = http.last_request().unwrap();
    assert_eq!(
        req.body.as_deref(),
        Some(r#"{"title":"Ship","projectId":1,"status":"TODO"}"#)
    );
}

#[test]
fn test_updates_use_put() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Put, "http://api.test/api/projects/5", 200, &project_json(5, "Apollo II"));
    http.mock_response(
        HttpMethod::Put,
        "http://api.test/api/tasks/8",
        200,
        r#"{"id":8,"title":"Retitled","projectId":5,"status":"IN_PROGRESS"}"#,
    );

    let project = block_on(api.update_project(
        5,
        ProjectRequest {
            title: "Apollo II".to_string(),
            description: None,
        },
    ))
    .unwrap();
    assert_eq!(project.title, "Apollo II");
    assert_eq!(http.last_request().unwrap().body.as_deref(), Some(r#"{"title":"Apollo II"}"#));

    let task = block_on(api.update_task(
        8,
        TaskRequest {
            title: "Retitled".to_string(),
            description: None,
            project_id: 5,
            assigned_user_id: None,
            status: Some(TaskStatus::InProgress),
            due_date: None,
        },
    ))
    .unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(http.requests.borrow().len(), 2);
}

#[test]
fn test_get_project_parses_fields() {
    let (api, http, _storage) = create_client();
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/projects/5",
        200,
        &project_json(5, "Apollo"),
    );

    let project = block_on(api.get_project(5)).unwrap();
    assert_eq!(project.title, "Apollo");
    assert_eq!(project.owner_initial(), "A");
    assert_eq!(project.task_count, 2);
}

#[test]
fn test_delete_accepts_empty_body() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Delete, "http://api.test/api/projects/5", 204, "");

    assert_eq!(block_on(api.delete_project(5)), Ok(()));
    assert_eq!(http.last_request().unwrap().method, HttpMethod::Delete);
}

// =========================================================
// 错误映射
// =========================================================

#[test]
fn test_status_error_carries_server_message() {
    let (api, http, _storage) = create_client();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/auth/register",
        400,
        r#"{"message":"Email already registered"}"#,
    );

    let err = block_on(api.register(&RegisterRequest {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
        role: Role::User,
    }))
    .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Registration failed."), "Email already registered");
}

#[test]
fn test_unparseable_error_body_uses_fallback() {
    let (api, _http, _storage) = create_client();

    // 未预设的路由返回纯文本 404
    let err = block_on(api.get_project(99)).unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            body: None
        }
    );
    assert_eq!(err.user_message("Failed to load project"), "Failed to load project");
}

#[test]
fn test_network_error_is_propagated() {
    let (api, http, _storage) = create_client();
    http.fail_with(ApiError::Network("Failed to fetch".to_string()));

    let err = block_on(api.get_users()).unwrap_err();
    assert_eq!(err, ApiError::Network("Failed to fetch".to_string()));
}

#[test]
fn test_malformed_success_body_is_decode_error() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Get, "http://api.test/api/users", 200, "{not json");

    let err = block_on(api.get_users()).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =========================================================
// 修改后重新拉取
// =========================================================

fn called(http: &MockHttpClient) -> Vec<String> {
    http.requests
        .borrow()
        .iter()
        .map(|r| format!("{} {}", r.method.as_str(), r.url))
        .collect()
}

#[test]
fn test_deleted_project_is_gone_from_refetched_list() {
    let (api, http, _storage) = create_client();
    let url = "http://api.test/api/projects";
    http.mock_response(
        HttpMethod::Get,
        url,
        200,
        &format!("[{},{}]", project_json(1, "Apollo"), project_json(2, "Gemini")),
    );
    http.mock_response(HttpMethod::Get, url, 200, &format!("[{}]", project_json(2, "Gemini")));
    http.mock_response(HttpMethod::Delete, "http://api.test/api/projects/1", 204, "");

    let before = block_on(api.get_projects()).unwrap();
    assert!(before.iter().any(|p| p.id == 1));

    let after = block_on(api.delete_project_and_list(1)).unwrap();
    assert!(after.iter().all(|p| p.id != 1));
    assert_eq!(after.len(), 1);

    assert_eq!(
        called(&http),
        vec![
            "GET http://api.test/api/projects",
            "DELETE http://api.test/api/projects/1",
            "GET http://api.test/api/projects",
        ]
    );
}

#[test]
fn test_failed_delete_skips_refetch() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Delete, "http://api.test/api/projects/1", 403, r#"{"message":"Forbidden"}"#);

    let err = block_on(api.delete_project_and_list(1)).unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(called(&http), vec!["DELETE http://api.test/api/projects/1"]);
}

#[test]
fn test_created_task_appears_as_todo_after_refetch() {
    let (api, http, _storage) = create_client();
    let list = "http://api.test/api/tasks/project/4";
    http.mock_response(HttpMethod::Get, list, 200, "[]");
    http.mock_response(
        HttpMethod::Get,
        list,
        200,
        r#"[{"id":31,"title":"Ship","projectId":4,"status":"TODO"}]"#,
    );
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/tasks",
        201,
        r#"{"id":31,"title":"Ship","projectId":4,"status":"TODO"}"#,
    );

    assert!(block_on(api.get_tasks_by_project(4)).unwrap().is_empty());

    let tasks = block_on(api.create_task_and_list(TaskRequest {
        title: "Ship".to_string(),
        description: None,
        project_id: 4,
        assigned_user_id: None,
        status: Some(TaskStatus::Todo),
        due_date: None,
    }))
    .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 31);
    assert_eq!(tasks[0].status, TaskStatus::Todo);
    assert_eq!(
        called(&http)[1..],
        [
            "POST http://api.test/api/tasks".to_string(),
            format!("GET {}", list),
        ]
    );
}

#[test]
fn test_load_board_fetches_users_only_for_admins() {
    let (api, http, _storage) = create_client();
    http.mock_response(HttpMethod::Get, "http://api.test/api/projects/5", 200, &project_json(5, "Apollo"));
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/tasks/project/5",
        200,
        r#"[{"id":1,"title":"A","projectId":5,"status":"IN_PROGRESS"}]"#,
    );
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/users",
        200,
        r#"[{"id":9,"name":"Ada","email":"ada@example.com","role":"USER"}]"#,
    );

    let member = block_on(api.load_board(5, false));
    let (project, tasks) = member.board.unwrap();
    assert_eq!(project.id, 5);
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert!(member.users.is_none());
    assert!(called(&http).iter().all(|c| !c.ends_with("/api/users")));

    http.requests.borrow_mut().clear();
    let admin = block_on(api.load_board(5, true));
    assert!(admin.board.is_ok());
    assert_eq!(admin.users.unwrap().unwrap()[0].name, "Ada");

    // 三个请求在同一轮中发出
    let mut sent = called(&http);
    sent.sort();
    assert_eq!(
        sent,
        vec![
            "GET http://api.test/api/projects/5",
            "GET http://api.test/api/tasks/project/5",
            "GET http://api.test/api/users",
        ]
    );
}

#[test]
fn test_load_board_reports_missing_project() {
    let (api, _http, _storage) = create_client();
    let load = block_on(api.load_board(77, false));
    assert_eq!(load.board.unwrap_err().status(), Some(404));
}
