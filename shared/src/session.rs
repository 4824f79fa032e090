//! 会话状态
//!
//! token 是唯一需要持久化的状态；`user` 只在内存中，刷新后不会恢复。

use std::cell::RefCell;

use crate::UserSummary;

/// token 的持久化存储（浏览器中为 LocalStorage）
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserSummary>,
}

impl Session {
    /// 未登录的会话
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: String, user: Option<UserSummary>) -> Self {
        Self {
            token: Some(token),
            user,
        }
    }

    /// 启动时同步读取已保存的 token，不向服务器校验
    pub fn restore(store: &impl TokenStore) -> Self {
        match store.load() {
            Some(token) if !token.is_empty() => Self::authenticated(token, None),
            _ => Self::anonymous(),
        }
    }

    /// 仅检查 token 是否存在
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// =========================================================
// 内存实现
// =========================================================

/// 非浏览器环境和测试使用的内存存储
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> bool {
        *self.token.borrow_mut() = Some(token.to_string());
        true
    }

    fn clear(&self) -> bool {
        *self.token.borrow_mut() = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_without_token_is_anonymous() {
        let store = MemoryTokenStore::new();
        let session = Session::restore(&store);
        assert!(!session.is_authenticated());
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn test_restore_loads_token_but_not_user() {
        let store = MemoryTokenStore::with_token("abc");
        let session = Session::restore(&store);
        assert_eq!(session.token(), Some("abc"));
        assert!(session.user.is_none());
    }

    #[test]
    fn test_restore_treats_empty_token_as_absent() {
        let store = MemoryTokenStore::with_token("");
        assert!(!Session::restore(&store).is_authenticated());
    }
}
