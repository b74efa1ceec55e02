//! HTTP 请求封装模块
//!
//! `HttpClient` 特性把传输层与 API 层解耦：生产环境使用 `gloo-net`
//! 发起 fetch，测试中替换为记录请求的模拟实现。

use gloo_net::http::{Request, RequestBuilder};
use promanager_shared::protocol::HttpMethod;

use crate::error::ApiError;

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn with_json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self.with_header("Content-Type", "application/json")
    }

    /// 按名称查找请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性
///
/// (?Send) 是因为浏览器中的 fetch future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn builder(req: &HttpRequest) -> RequestBuilder {
        let builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Patch => Request::patch(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        req.headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let builder = Self::builder(&req);
        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Build(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;

#[cfg(test)]
mod mock {
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    use super::*;

    /// 按 "METHOD URL" 返回预设响应，并记录所有发出的请求
    ///
    /// 同一端点可预设多个响应，按顺序消费，最后一个会一直保留，
    /// 用于模拟修改前后服务端状态的变化。
    /// 克隆后共享同一份状态，便于移交给 `ApiClient` 后继续断言。
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        responses: Rc<RefCell<HashMap<String, VecDeque<(u16, String)>>>>,
        failure: Rc<RefCell<Option<ApiError>>>,
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .entry(format!("{} {}", method.as_str(), url))
                .or_default()
                .push_back((status, body.to_string()));
        }

        /// 之后的请求全部以给定错误失败
        pub fn fail_with(&self, error: ApiError) {
            *self.failure.borrow_mut() = Some(error);
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            let key = format!("{} {}", req.method.as_str(), req.url);
            self.requests.borrow_mut().push(req);

            if let Some(error) = self.failure.borrow().clone() {
                return Err(error);
            }

            let mut responses = self.responses.borrow_mut();
            let next = responses.get_mut(&key).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
            match next {
                Some((status, body)) => Ok(HttpResponse { status, body }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}
