//! LocalStorage 封装模块
//!
//! 直接使用 `web_sys::Storage`，token 以原始字符串保存在固定键下。

use carmanager_shared::STORAGE_TOKEN_KEY;
use carmanager_shared::session::TokenStore;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或出错时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 会话 token 的持久化
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(STORAGE_TOKEN_KEY)
    }

    fn save(&self, token: &str) -> bool {
        LocalStorage::set(STORAGE_TOKEN_KEY, token)
    }

    fn clear(&self) -> bool {
        LocalStorage::delete(STORAGE_TOKEN_KEY)
    }
}
