use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 客户端错误类型
///
/// 每种类型对应一条面向用户的通用提示，界面上不区分具体原因
/// （凭据错误、服务器错误、网络不可达都显示同一条消息）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 登录/注册被拒绝
    Auth,
    /// 列表获取失败
    Fetch,
    /// 创建/更新失败
    Save,
    /// 删除失败
    Delete,
    /// 传输层错误 (fetch 本身抛出异常)
    Network,
    /// JSON 解析或序列化错误
    Serialization,
    /// 提交前的本地校验失败
    InvalidInput,
}

impl ClientErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorKind::Auth => "AUTH_FAILED",
            ClientErrorKind::Fetch => "FETCH_FAILED",
            ClientErrorKind::Save => "SAVE_FAILED",
            ClientErrorKind::Delete => "DELETE_FAILED",
            ClientErrorKind::Network => "NETWORK_ERROR",
            ClientErrorKind::Serialization => "JSON_PARSE_ERROR",
            ClientErrorKind::InvalidInput => "INVALID_INPUT",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// 操作名称，如 "cars.list", "auth.login"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误
///
/// - kind: 错误类型
/// - message: 展示给用户的消息
/// - status: 非 2xx 响应时的 HTTP 状态码（仅用于日志）
/// - source: 原始错误（可选）
/// - spans: 操作追踪栈
#[derive(Debug)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    message: String,
    status: Option<u16>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Auth, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Fetch, message)
    }

    pub fn save(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Save, message)
    }

    pub fn delete(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Delete, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Serialization, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::InvalidInput, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// 将底层错误折叠为指定类型的通用错误
    ///
    /// 原错误的消息和追踪保留在 span 中，仅供日志使用。
    pub fn generalize(self, kind: ClientErrorKind, message: impl Into<String>) -> Self {
        let mut spans = self.spans;
        spans.push(ErrorSpan::with_detail(
            self.kind.error_code(),
            self.message,
        ));
        Self {
            kind,
            message: message.into(),
            status: self.status,
            source: self.source,
            spans,
        }
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// 面向用户的消息
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::serialization(e.to_string()).with_source(e)
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_status_and_trace() {
        let err = ClientError::fetch("Failed to fetch cars")
            .with_status(500)
            .in_op_with("cars.list", "search=Honda");

        assert_eq!(
            err.to_string(),
            "[FETCH_FAILED] Failed to fetch cars (HTTP 500) | trace: cars.list(search=Honda)"
        );
        assert_eq!(err.message(), "Failed to fetch cars");
    }

    #[test]
    fn test_generalize_hides_transport_detail_from_message() {
        let err = ClientError::network("TypeError: Failed to fetch")
            .in_op("http.send")
            .generalize(ClientErrorKind::Auth, "Login failed");

        assert_eq!(err.kind, ClientErrorKind::Auth);
        assert_eq!(err.message(), "Login failed");
        assert_eq!(err.spans().len(), 2);
        assert_eq!(err.spans()[1].operation, "NETWORK_ERROR");
        assert_eq!(
            err.spans()[1].detail.as_deref(),
            Some("TypeError: Failed to fetch")
        );
    }
}
