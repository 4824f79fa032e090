use crate::Car;
use crate::client::{HttpClient, HttpRequest, HttpResponse};
use crate::error::{ClientError, ClientErrorKind, ClientResult};
use crate::payload::CarPayload;
use crate::protocol::{
    ApiRequest, CreateCarRequest, DeleteCarRequest, ListCarsRequest, UpdateCarRequest,
};

const MSG_FETCH_FAILED: &str = "Failed to fetch cars";
const MSG_SAVE_FAILED: &str = "Failed to save car";
const MSG_DELETE_FAILED: &str = "Failed to delete car";

/// 车辆记录的 REST 客户端
///
/// 每个请求都携带 Bearer token。失败只尝试一次，不重试。
#[derive(Clone, Debug, PartialEq)]
pub struct CarRepository<C> {
    client: C,
    base_url: String,
    token: String,
}

impl<C: HttpClient> CarRepository<C> {
    pub fn new(client: C, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request<R: ApiRequest>(&self, req: &R) -> HttpRequest<C::File> {
        HttpRequest::new(self.url(&req.path()), R::METHOD).with_bearer(&self.token)
    }

    /// 发送请求并把任何失败折叠为 `kind` 对应的通用错误
    async fn dispatch(
        &self,
        req: HttpRequest<C::File>,
        kind: ClientErrorKind,
        message: &str,
        op: &str,
    ) -> ClientResult<HttpResponse> {
        let res = self
            .client
            .send(req)
            .await
            .map_err(|e| e.generalize(kind, message).in_op(op))?;

        if !res.ok() {
            return Err(ClientError::new(kind, message)
                .with_status(res.status)
                .in_op(op));
        }
        Ok(res)
    }

    /// 获取车辆列表，`search` 原样（URL 编码后）传给服务器过滤
    pub async fn list(&self, search: &str) -> ClientResult<Vec<Car>> {
        let req = ListCarsRequest {
            search: search.to_string(),
        };
        let http = self.request(&req);

        let result = async {
            let res = self
                .dispatch(http, ClientErrorKind::Fetch, MSG_FETCH_FAILED, "cars.list")
                .await?;
            res.json::<<ListCarsRequest as ApiRequest>::Response>()
                .map_err(|e| {
                    e.generalize(ClientErrorKind::Fetch, MSG_FETCH_FAILED)
                        .in_op("cars.list")
                })
        }
        .await;

        match &result {
            Ok(cars) => log::debug!("fetched {} cars for search {:?}", cars.len(), search),
            Err(e) => log::warn!("{}", e),
        }
        result
    }

    /// 创建车辆；成功后由调用方刷新列表
    pub async fn create(&self, payload: CarPayload<C::File>) -> ClientResult<()> {
        log::debug!("creating car with {} images", payload.image_count());
        let http = self
            .request(&CreateCarRequest)
            .with_multipart(payload.into_parts());

        self.dispatch(http, ClientErrorKind::Save, MSG_SAVE_FAILED, "cars.create")
            .await
            .map(|_| ())
            .inspect_err(|e| log::warn!("{}", e))
    }

    /// 更新车辆，负载结构与创建相同
    pub async fn update(&self, id: &str, payload: CarPayload<C::File>) -> ClientResult<()> {
        log::debug!("updating car {} with {} new images", id, payload.image_count());
        let req = UpdateCarRequest { id: id.to_string() };
        let http = self.request(&req).with_multipart(payload.into_parts());

        self.dispatch(http, ClientErrorKind::Save, MSG_SAVE_FAILED, "cars.update")
            .await
            .map(|_| ())
            .map_err(|e| e.in_op_with("car", id))
            .inspect_err(|e| log::warn!("{}", e))
    }

    /// 删除车辆；不解析响应体
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let req = DeleteCarRequest { id: id.to_string() };
        let http = self.request(&req);

        self.dispatch(http, ClientErrorKind::Delete, MSG_DELETE_FAILED, "cars.delete")
            .await
            .map(|_| ())
            .map_err(|e| e.in_op_with("car", id))
            .inspect_err(|e| log::warn!("{}", e))
    }
}

#[cfg(test)]
mod tests;
