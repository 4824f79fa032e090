//! HTTP 传输抽象层
//!
//! 业务层（`CarRepository`、`AuthGateway`）只依赖 `HttpClient` trait，
//! 浏览器端用 fetch 实现，测试中用 `MockHttpClient` 替换。

use crate::error::{ClientError, ClientResult};
use crate::protocol::HttpMethod;
use serde::de::DeserializeOwned;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 请求与响应
// =========================================================

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<F> {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: F },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<F> {
    Empty,
    Json(String),
    Multipart(Vec<FormPart<F>>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest<F> {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody<F>,
}

impl<F> HttpRequest<F> {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(crate::HEADER_AUTHORIZATION, &format!("Bearer {}", token))
    }

    pub fn with_json(mut self, body: String) -> Self {
        self.body = RequestBody::Json(body);
        self.with_header(crate::HEADER_CONTENT_TYPE, "application/json")
    }

    /// multipart 请求不设置 Content-Type，由浏览器生成 boundary
    pub fn with_multipart(mut self, parts: Vec<FormPart<F>>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(ClientError::from)
    }
}

// =========================================================
// 核心抽象
// =========================================================

/// 单次请求，不重试。传输层异常返回 `ClientErrorKind::Network`，
/// 非 2xx 状态码不算错误，由调用方判断。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// 平台相关的上传文件类型（浏览器中为 `web_sys::File`）
    type File: Clone + 'static;

    async fn send(&self, req: HttpRequest<Self::File>) -> ClientResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD url", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 模拟网络异常的 "METHOD url"
    network_failures: RefCell<Vec<String>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            network_failures: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(method, url, status, &body.to_string());
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), (status, body.to_string()));
    }

    pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
        self.network_failures
            .borrow_mut()
            .push(Self::key(method, url));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    type File = String;

    async fn send(&self, req: HttpRequest<String>) -> ClientResult<HttpResponse> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url,
            headers: req.headers,
            body: req.body,
        });

        if self.network_failures.borrow().contains(&key) {
            return Err(ClientError::network("TypeError: Failed to fetch").in_op("mock.send"));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
