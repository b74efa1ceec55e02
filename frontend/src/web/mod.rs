//! 浏览器 Web API 封装模块
//!
//! - `http`: 传输层特性与 fetch 实现
//! - `storage`: 键值存储特性与 LocalStorage 实现
//! - `route` / `guard` / `router`: 基于 History API 的路由与守卫

mod http;
mod storage;

pub mod guard;
pub mod route;
pub mod router;

pub use http::{FetchHttpClient, HttpClient, HttpRequest};
pub use storage::{BrowserStorage, KeyValueStore};

#[cfg(test)]
pub use http::MockHttpClient;
#[cfg(test)]
pub use storage::MemoryStorage;

/// 弹出浏览器确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
