//! 浏览器 HTTP 传输
//!
//! 使用 `gloo-net` 实现 `carmanager_shared::client::HttpClient`，
//! multipart 负载转换为 `FormData` 交给 fetch，由浏览器生成 boundary。

use carmanager_shared::client::{FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody};
use carmanager_shared::protocol::HttpMethod;
use carmanager_shared::{ClientError, ClientResult};
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// fetch 客户端，无状态，可随意复制
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchClient;

fn js_error(context: &str, e: JsValue) -> ClientError {
    let detail = e.as_string().unwrap_or_else(|| format!("{:?}", e));
    ClientError::network(format!("{}: {}", context, detail)).in_op("http.form_data")
}

/// 把 multipart 字段写入 `FormData`
fn to_form_data(parts: Vec<FormPart<File>>) -> ClientResult<FormData> {
    let form = FormData::new().map_err(|e| js_error("创建 FormData 失败", e))?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form
                .append_with_str(name, &value)
                .map_err(|e| js_error("写入文本字段失败", e))?,
            FormPart::File { name, file } => form
                .append_with_blob(name, &file)
                .map_err(|e| js_error("写入文件字段失败", e))?,
        }
    }
    Ok(form)
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    type File = File;

    async fn send(&self, req: HttpRequest<File>) -> ClientResult<HttpResponse> {
        let mut rb = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            rb = rb.header(key, value);
        }

        let network = |e: gloo_net::Error| {
            ClientError::network(e.to_string()).in_op_with("http.send", req.url.clone())
        };

        let response = match req.body {
            RequestBody::Empty => rb.send().await.map_err(network)?,
            RequestBody::Json(body) => rb.body(body).map_err(network)?.send().await.map_err(network)?,
            RequestBody::Multipart(parts) => {
                let form = to_form_data(parts)?;
                rb.body(form).map_err(network)?.send().await.map_err(network)?
            }
        };

        let status = response.status();
        // 非 2xx 响应体读取失败时不影响错误判断
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
