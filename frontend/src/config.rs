//! 运行时配置
//!
//! API 地址在构建时通过环境变量注入（Trunk 构建时设置 `CARMANAGER_API_URL`），
//! 未设置时使用本地开发地址。

/// 未定义环境变量时使用的默认值
const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("CARMANAGER_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(url: &str) -> Self {
        let url = url.trim();
        let url = if url.is_empty() { DEFAULT_API_URL } else { url };
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
