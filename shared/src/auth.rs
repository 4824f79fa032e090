//! 认证网关
//!
//! 封装登录/注册请求，成功后把 token 写入 `TokenStore` 并返回新的 `Session`。
//! 失败时 store 不会被改动，调用方保留原有会话。导航由路由层根据会话变化处理。

use crate::client::{HttpClient, HttpRequest};
use crate::error::{ClientError, ClientErrorKind, ClientResult};
use crate::protocol::{ApiRequest, AuthResponse, LoginRequest, SignupRequest};
use crate::session::{Session, TokenStore};
use serde::Serialize;

const MSG_LOGIN_FAILED: &str = "Login failed";
const MSG_SIGNUP_FAILED: &str = "Signup failed";

#[derive(Clone, Debug)]
pub struct AuthGateway<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> AuthGateway<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub async fn login(
        &self,
        store: &impl TokenStore,
        email: &str,
        password: &str,
    ) -> ClientResult<Session> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate(store, &req, MSG_LOGIN_FAILED, "auth.login")
            .await
    }

    pub async fn signup(
        &self,
        store: &impl TokenStore,
        email: &str,
        password: &str,
        name: &str,
    ) -> ClientResult<Session> {
        let req = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        self.authenticate(store, &req, MSG_SIGNUP_FAILED, "auth.signup")
            .await
    }

    /// 纯本地操作：清除 token，返回匿名会话
    pub fn logout(&self, store: &impl TokenStore) -> Session {
        if !store.clear() {
            log::warn!("failed to clear stored token");
        }
        log::info!("logged out");
        Session::anonymous()
    }

    async fn authenticate<R>(
        &self,
        store: &impl TokenStore,
        req: &R,
        message: &str,
        op: &str,
    ) -> ClientResult<Session>
    where
        R: ApiRequest<Response = AuthResponse> + Serialize,
    {
        let result = self.exchange(req, message, op).await;

        match result {
            Ok(auth) => {
                if !store.save(&auth.token) {
                    log::warn!("{}: token could not be persisted", op);
                }
                log::info!("{} succeeded", op);
                Ok(Session::authenticated(auth.token, auth.user))
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(e)
            }
        }
    }

    async fn exchange<R>(&self, req: &R, message: &str, op: &str) -> ClientResult<AuthResponse>
    where
        R: ApiRequest<Response = AuthResponse> + Serialize,
    {
        let body = serde_json::to_string(req)
            .map_err(|e| ClientError::from(e).generalize(ClientErrorKind::Auth, message))?;
        let http = HttpRequest::new(format!("{}{}", self.base_url, req.path()), R::METHOD)
            .with_json(body);

        let res = self
            .client
            .send(http)
            .await
            .map_err(|e| e.generalize(ClientErrorKind::Auth, message).in_op(op))?;

        if !res.ok() {
            return Err(ClientError::auth(message)
                .with_status(res.status)
                .in_op(op));
        }

        let auth = res
            .json::<AuthResponse>()
            .map_err(|e| e.generalize(ClientErrorKind::Auth, message).in_op(op))?;

        // 空 token 在恢复会话时会被视为未登录，这里同样拒绝
        if auth.token.is_empty() {
            return Err(ClientError::auth(message)
                .with_status(res.status)
                .in_op_with(op, "empty token"));
        }
        Ok(auth)
    }
}

#[cfg(test)]
mod tests;
