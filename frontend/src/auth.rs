//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号检查状态，并在状态变化时自动跳转，
//! 因此这里的登录/登出函数只负责更新会话。

use carmanager_shared::ClientResult;
use carmanager_shared::auth::AuthGateway;
use carmanager_shared::repository::CarRepository;
use carmanager_shared::session::Session;
use leptos::prelude::*;

use crate::config::AppConfig;
use crate::web::{BrowserTokenStore, FetchClient};

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Session,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    pub fn new(config: AppConfig) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            config: StoredValue::new(config),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session.is_authenticated()))
    }

    /// 当前 token，仅在 token 真正变化时通知订阅者
    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.session.token.clone())).into()
    }

    fn gateway(&self) -> AuthGateway<FetchClient> {
        AuthGateway::new(FetchClient, self.config.with_value(|c| c.api_base_url.clone()))
    }

    /// 以当前 token 构造车辆仓库客户端；未登录时返回 `None`
    pub fn repository(&self) -> Option<CarRepository<FetchClient>> {
        let token = self.state.with_untracked(|s| s.session.token.clone())?;
        Some(self.repository_for(token))
    }

    pub fn repository_for(&self, token: String) -> CarRepository<FetchClient> {
        CarRepository::new(
            FetchClient,
            self.config.with_value(|c| c.api_base_url.clone()),
            token,
        )
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 同步读取 LocalStorage 中的 token，不向服务器校验。
pub fn init_auth(ctx: &AuthContext) {
    let session = Session::restore(&BrowserTokenStore);
    log::debug!(
        "restored session (authenticated: {})",
        session.is_authenticated()
    );
    ctx.set_state.update(|state| state.session = session);
}

/// 登录；失败时会话保持不变
pub async fn login(ctx: &AuthContext, email: String, password: String) -> ClientResult<()> {
    let session = ctx
        .gateway()
        .login(&BrowserTokenStore, &email, &password)
        .await?;
    ctx.set_state.update(|state| state.session = session);
    Ok(())
}

/// 注册；成功后直接进入登录状态
pub async fn signup(
    ctx: &AuthContext,
    email: String,
    password: String,
    name: String,
) -> ClientResult<()> {
    let session = ctx
        .gateway()
        .signup(&BrowserTokenStore, &email, &password, &name)
        .await?;
    ctx.set_state.update(|state| state.session = session);
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    let session = ctx.gateway().logout(&BrowserTokenStore);
    ctx.set_state.update(|state| state.session = session);
}
