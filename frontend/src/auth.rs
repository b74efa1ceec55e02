//! 认证模块
//!
//! 管理当前登录身份，与路由系统解耦。
//! 路由服务通过注入的 `GuardState` 信号来检查认证状态。

use leptos::prelude::*;
use promanager_shared::{AuthResponse, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session};

use crate::logging::{log_error, log_info};
use crate::web::guard::GuardState;
use crate::web::{BrowserStorage, KeyValueStore};

// =========================================================
// 持久化层
// =========================================================

/// 会话持久化：`token` 保存原始令牌，`user` 保存身份 JSON
#[derive(Debug, Clone, Copy)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 保存登录响应，返回对应的会话身份
    pub fn save(&self, auth: &AuthResponse) -> Session {
        let session = Session::from(auth);
        self.storage.set(STORAGE_TOKEN_KEY, &auth.token);
        match serde_json_wasm::to_string(&session) {
            Ok(json) => self.storage.set(STORAGE_USER_KEY, &json),
            Err(e) => log_error!("[Auth] failed to serialize session: {}", e),
        }
        session
    }

    /// 恢复已保存的会话
    ///
    /// 两个键必须同时存在；字面量 `"undefined"` 视为缺失。
    /// 身份无法解析时清除两个键，以未登录状态继续。
    pub fn restore(&self) -> Option<Session> {
        let user = self.storage.get(STORAGE_USER_KEY)?;
        let token = self.storage.get(STORAGE_TOKEN_KEY)?;
        if user == "undefined" || user.is_empty() || token.is_empty() {
            return None;
        }

        match serde_json_wasm::from_str::<Session>(&user) {
            Ok(session) => Some(session),
            Err(e) => {
                log_error!("[Auth] failed to restore session: {}", e);
                self.clear();
                None
            }
        }
    }

    pub fn clear(&self) {
        self.storage.remove(STORAGE_TOKEN_KEY);
        self.storage.remove(STORAGE_USER_KEY);
    }
}

// =========================================================
// 上下文
// =========================================================

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<Session>>,
    loading: RwSignal<bool>,
    store: SessionStore<BrowserStorage>,
}

impl AuthContext {
    /// 创建新的认证上下文（尚未加载）
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            loading: RwSignal::new(true),
            store: SessionStore::new(BrowserStorage),
        }
    }

    /// 当前身份（响应式）
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .with(|session| session.as_ref().is_some_and(Session::is_admin))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// 保存登录响应并更新内存身份
    ///
    /// 导航由路由服务的认证状态监听自动处理。
    pub fn login(&self, auth: &AuthResponse) {
        let session = self.store.save(auth);
        log_info!("[Auth] signed in as {} ({})", session.email, session.role);
        self.session.set(Some(session));
    }

    /// 注销并清除状态
    pub fn logout(&self) {
        self.store.clear();
        self.session.set(None);
        log_info!("[Auth] signed out");
    }

    /// 获取守卫状态信号（用于路由服务注入）
    pub fn guard_state(&self) -> Signal<GuardState> {
        let ctx = *self;
        Signal::derive(move || {
            let loading = ctx.is_loading();
            ctx.session
                .with(|session| GuardState::from_session(loading, session.as_ref()))
        })
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 同步恢复一次会话，随后结束加载状态。
pub fn init_auth(ctx: &AuthContext) {
    let restored = ctx.store.restore();
    if let Some(session) = &restored {
        log_info!("[Auth] restored session for {}", session.email);
    }
    ctx.session.set(restored);
    ctx.loading.set(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStorage;
    use promanager_shared::Role;

    fn auth_response(role: Role) -> AuthResponse {
        AuthResponse {
            token: "t1".to_string(),
            user_id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_save_persists_token_and_identity() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());

        let session = store.save(&auth_response(Role::User));

        assert_eq!(
            session,
            Session {
                id: 1,
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                role: Role::User,
            }
        );
        assert!(!session.is_admin());
        assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(
            storage.get(STORAGE_USER_KEY).as_deref(),
            Some(r#"{"id":1,"name":"A","email":"a@b.com","role":"USER"}"#)
        );
    }

    #[test]
    fn test_admin_role_is_reflected() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(store.save(&auth_response(Role::Admin)).is_admin());
        assert_eq!(store.restore().map(|s| s.is_admin()), Some(true));
    }

    #[test]
    fn test_restore_round_trips_saved_session() {
        let store = SessionStore::new(MemoryStorage::new());
        let saved = store.save(&auth_response(Role::User));
        assert_eq!(store.restore(), Some(saved));
    }

    #[test]
    fn test_restore_requires_both_keys() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.save(&auth_response(Role::User));

        storage.remove(STORAGE_TOKEN_KEY);
        assert_eq!(store.restore(), None);
        // 不完整但可解析的状态保持原样
        assert!(storage.contains(STORAGE_USER_KEY));
    }

    #[test]
    fn test_restore_treats_undefined_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "t1");
        storage.set(STORAGE_USER_KEY, "undefined");

        assert_eq!(SessionStore::new(storage.clone()).restore(), None);
        assert!(storage.contains(STORAGE_TOKEN_KEY));
    }

    #[test]
    fn test_restore_clears_corrupt_identity() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "t1");
        storage.set(STORAGE_USER_KEY, "{broken");

        assert_eq!(SessionStore::new(storage.clone()).restore(), None);
        assert!(!storage.contains(STORAGE_TOKEN_KEY));
        assert!(!storage.contains(STORAGE_USER_KEY));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.save(&auth_response(Role::Admin));

        store.clear();

        assert!(!storage.contains(STORAGE_TOKEN_KEY));
        assert!(!storage.contains(STORAGE_USER_KEY));
        assert_eq!(store.restore(), None);
    }
}
