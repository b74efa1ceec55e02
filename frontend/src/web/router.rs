//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::guard::{GuardState, Resolution, resolve};
use super::route::AppRoute;
use crate::logging::{log_info, log_warn};

/// 获取当前浏览器路径（含查询串）
fn current_path() -> String {
    web_sys::window()
        .map(|w| w.location())
        .map(|location| {
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_else(|| "/".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
}

/// 写入 History 状态（内部工具函数）
fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if let Err(e) = result {
        log_warn!("[Router] history update failed for {}: {:?}", path, e);
    }
}

/// 路由出口当前应显示的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteView {
    /// 会话恢复中
    Loading,
    Page(AppRoute),
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入守卫状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    view: RwSignal<RouteView>,
    /// 地址栏中的路径（等待期间为请求的路径）
    path: RwSignal<String>,
    /// 登录后需要返回的路径
    return_to: RwSignal<Option<String>>,
    /// 守卫状态（注入的信号，实现解耦）
    guard: Signal<GuardState>,
}

impl RouterService {
    fn new(guard: Signal<GuardState>) -> Self {
        Self {
            view: RwSignal::new(RouteView::Loading),
            path: RwSignal::new(current_path()),
            return_to: RwSignal::new(None),
            guard,
        }
    }

    /// 当前视图
    pub fn view(&self) -> RouteView {
        self.view.get()
    }

    /// 当前路由（加载中为 `None`）
    pub fn current_route(&self) -> Option<AppRoute> {
        match self.view.get() {
            RouteView::Page(route) => Some(route),
            RouteView::Loading => None,
        }
    }

    /// 当前路径（响应式）
    pub fn current_path(&self) -> String {
        self.path.get()
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.apply(path, HistoryMode::Push);
    }

    /// 浏览器后退
    pub fn back(&self) {
        if let Some(Err(e)) = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|h| h.back())
        {
            log_warn!("[Router] history.back failed: {:?}", e);
        }
    }

    /// 对路径运行守卫并更新地址栏和视图
    fn apply(&self, requested: &str, mode: HistoryMode) {
        let state = self.guard.get_untracked();
        let return_to = self.return_to.get_untracked();

        match resolve(state, requested, return_to.as_deref()) {
            Resolution::Wait => {
                if mode == HistoryMode::Push {
                    write_history(requested, mode);
                }
                self.path.set(requested.to_string());
                self.set_view(RouteView::Loading);
            }
            Resolution::Render {
                route,
                path,
                redirected,
                remember,
            } => {
                if redirected {
                    log_info!("[Router] {} -> {} ({:?})", requested, path, state);
                }
                if remember.is_some() {
                    self.return_to.set(remember);
                } else if state.is_authenticated() && return_to.is_some() {
                    self.return_to.set(None);
                }

                // 重定向时替换请求的条目，而不是在其后追加
                match mode {
                    HistoryMode::Push => write_history(&path, HistoryMode::Push),
                    HistoryMode::Replace if redirected => {
                        write_history(&path, HistoryMode::Replace)
                    }
                    HistoryMode::Replace => {}
                }
                self.path.set(path);
                self.set_view(RouteView::Page(route));
            }
        }
    }

    fn set_view(&self, view: RouteView) {
        if self.view.get_untracked() != view {
            self.view.set(view);
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            router.apply(&current_path(), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                log_warn!("[Router] failed to listen for popstate: {:?}", e);
            }
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 守卫状态变化时重新解析当前路径
    ///
    /// 首次运行即完成初始导航；之后登录、注销、加载完成都会触发。
    fn setup_guard_redirect(&self) {
        let router = *self;
        let guard = self.guard;

        Effect::new(move |_| {
            let _ = guard.get();
            let path = router.path.get_untracked();
            router.apply(&path, HistoryMode::Replace);
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(guard: Signal<GuardState>) -> RouterService {
    let router = RouterService::new(guard);

    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 守卫状态信号
    guard: Signal<GuardState>,
    children: Children,
) -> impl IntoView {
    provide_router(guard);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let view = Memo::new(move |_| router.view());

    move || match view.get() {
        RouteView::Page(route) => matcher(route),
        RouteView::Loading => view! {
            <div class="min-h-screen flex items-center justify-center">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接
///
/// 拦截点击，交给路由服务导航（经过守卫）。
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
