//! API 错误类型
//!
//! 统一描述一次 REST 调用可能的失败方式，并负责提取面向用户的消息。

use core::fmt;

use promanager_shared::ErrorBody;

/// REST 调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求构建失败（序列化请求体、构造 fetch 请求）
    Build(String),
    /// 网络错误（未收到响应）
    Network(String),
    /// 非 2xx 响应，附带尽力解析的结构化错误体
    Status {
        status: u16,
        body: Option<ErrorBody>,
    },
    /// 响应解析失败
    Decode(String),
}

impl ApiError {
    /// 面向用户的错误消息
    ///
    /// 优先使用服务端 `message`，其次 `errors` 字段表，最后使用 `fallback`。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                body: Some(body), ..
            } => body.describe().unwrap_or_else(|| fallback.to_string()),
            _ => fallback.to_string(),
        }
    }

    /// HTTP 状态码（仅 `Status` 变体）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Build(msg) => write!(f, "request build failed: {}", msg),
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status { status, body } => {
                write!(f, "HTTP {}", status)?;
                if let Some(detail) = body.as_ref().and_then(ErrorBody::describe) {
                    write!(f, ": {}", detail)?;
                }
                Ok(())
            }
            ApiError::Decode(msg) => write!(f, "response parse failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 400,
            body: Some(ErrorBody {
                message: Some("Email already registered".to_string()),
                errors: None,
            }),
        };
        assert_eq!(err.user_message("Registration failed."), "Email already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn user_message_renders_field_errors() {
        let mut errors = BTreeMap::new();
        errors.insert("status".to_string(), "must not be null".to_string());
        let err = ApiError::Status {
            status: 400,
            body: Some(ErrorBody {
                message: None,
                errors: Some(errors),
            }),
        };
        assert_eq!(err.user_message("fallback"), "status: must not be null");
    }

    #[test]
    fn user_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            body: None,
        };
        assert_eq!(err.user_message("Failed to update task status"), "Failed to update task status");
        let err = ApiError::Network("Failed to fetch".to_string());
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_includes_server_detail() {
        let err = ApiError::Status {
            status: 404,
            body: Some(ErrorBody {
                message: Some("Project not found".to_string()),
                errors: None,
            }),
        };
        assert_eq!(err.to_string(), "HTTP 404: Project not found");
        assert_eq!(
            ApiError::Decode("eof".to_string()).to_string(),
            "response parse failed: eof"
        );
    }
}
