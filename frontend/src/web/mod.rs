//! 原生 Web API 封装模块
//!
//! fetch 传输、LocalStorage 与 History 路由都集中在这里。

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::FetchClient;
pub use storage::BrowserTokenStore;
