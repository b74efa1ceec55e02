//! 运行时配置
//!
//! 后端地址在编译期从环境变量读取，未定义时使用默认值。

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// 后端地址环境变量（构建时读取，例如 `PROMANAGER_API_BASE_URL=https://api.example.com trunk build`）
const API_BASE_URL: Option<&str> = option_env!("PROMANAGER_API_BASE_URL");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: &'static str,
}

impl AppConfig {
    /// 从构建环境解析配置
    pub fn from_env() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    fn with_base_url(base_url: Option<&'static str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/');
        Self { api_base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_default_url() {
        assert_eq!(AppConfig::with_base_url(None).api_base_url, "http://localhost:8080");
        assert_eq!(AppConfig::with_base_url(Some("  ")).api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_trims_trailing_slash() {
        let config = AppConfig::with_base_url(Some("https://api.example.com/"));
        assert_eq!(config.api_base_url, "https://api.example.com");
    }
}
