//! ProManager 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::guard`: 路由定义与守卫状态机（纯逻辑）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `theme`: 会话与主题上下文
//! - `api`: REST 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod board;
mod config;
mod error;
mod logging;
mod theme;
mod web;

mod components {
    pub mod admin_dashboard;
    pub mod admin_panel;
    pub mod dashboard;
    pub mod dashboard_router;
    pub mod form_state;
    pub mod icons;
    pub mod landing;
    pub mod layout;
    pub mod login;
    pub mod my_tasks;
    pub mod notice;
    pub mod project_details;
    pub mod register;
    pub mod ui;
}

use leptos::prelude::*;

use crate::api::Api;
use crate::auth::{AuthContext, init_auth};
use crate::components::admin_panel::AdminPanel;
use crate::components::dashboard::DashboardPage;
use crate::components::dashboard_router::DashboardRouter;
use crate::components::landing::LandingPage;
use crate::components::layout::MainLayout;
use crate::components::login::LoginPage;
use crate::components::project_details::ProjectDetailsPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::theme::ThemeContext;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 别名路由（`/`、`/admin`、未知路径）在守卫阶段已被重定向，不会到达这里。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Welcome => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Projects => view! { <DashboardPage /> }.into_any(),
        AppRoute::Project(id) => view! { <ProjectDetailsPage project_id=id /> }.into_any(),
        AppRoute::AdminSection(tab) => view! { <AdminPanel tab=tab /> }.into_any(),
        AppRoute::Dashboard | AppRoute::Root | AppRoute::Admin | AppRoute::NotFound => {
            view! { <DashboardRouter /> }.into_any()
        }
    }
}

/// 根据当前路由决定是否套用侧边栏布局
///
/// 布局只在“有布局 ↔ 无布局”切换时重建，页面之间切换时侧边栏保持不变。
#[component]
fn Shell() -> impl IntoView {
    let router = use_router();
    let with_layout = Memo::new(move |_| {
        router
            .current_route()
            .is_some_and(|route| route.uses_layout())
    });

    move || {
        if with_layout.get() {
            view! {
                <MainLayout>
                    <RouterOutlet matcher=route_matcher />
                </MainLayout>
            }
            .into_any()
        } else {
            view! { <RouterOutlet matcher=route_matcher /> }.into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 主题上下文（立即应用已保存的主题）
    provide_context(ThemeContext::new());

    // 2. API 客户端
    provide_context(Api::from_config(AppConfig::from_env()));

    // 3. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 4. 获取守卫状态信号，用于注入路由服务（解耦！）
    let guard = auth_ctx.guard_state();

    view! {
        <Router guard=guard>
            <Shell />
        </Router>
    }
}
