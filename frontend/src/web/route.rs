//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问级别。

use std::fmt::Display;

/// 管理面板的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Projects,
    Users,
    Stats,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Projects, AdminTab::Users, AdminTab::Stats];

    pub fn slug(&self) -> &'static str {
        match self {
            AdminTab::Projects => "projects",
            AdminTab::Users => "users",
            AdminTab::Stats => "stats",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Projects => "Projects",
            AdminTab::Users => "Users",
            AdminTab::Stats => "Stats",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }
}

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 仅未登录访客（已登录用户会被送走）
    GuestOnly,
    /// 需要登录
    Member,
    /// 需要管理员角色
    AdminOnly,
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// `/`，始终转发到面板
    Root,
    /// 公开的介绍页
    Welcome,
    Login,
    Register,
    /// 按角色分流的任务面板
    #[default]
    Dashboard,
    /// 项目网格
    Projects,
    /// 项目看板
    Project(u64),
    /// `/admin`，转发到项目标签页
    Admin,
    AdminSection(AdminTab),
    /// 未匹配的路径，转发到面板
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 查询串、片段和末尾斜杠会被忽略。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Self::Root,
            ["welcome"] => Self::Welcome,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["projects"] => Self::Projects,
            ["project", id] => id.parse().map(Self::Project).unwrap_or(Self::NotFound),
            ["admin"] => Self::Admin,
            ["admin", tab] => AdminTab::from_slug(tab)
                .map(Self::AdminSection)
                .unwrap_or(Self::NotFound),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Welcome => "/welcome".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Projects => "/projects".to_string(),
            Self::Project(id) => format!("/project/{}", id),
            Self::Admin => "/admin".to_string(),
            Self::AdminSection(tab) => format!("/admin/{}", tab.slug()),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Welcome | Self::Login | Self::Register => Access::GuestOnly,
            Self::Admin | Self::AdminSection(_) => Access::AdminOnly,
            Self::Root
            | Self::Dashboard
            | Self::Projects
            | Self::Project(_)
            | Self::NotFound => Access::Member,
        }
    }

    /// 无条件转发的路由及其目标
    pub fn alias_target(&self) -> Option<Self> {
        match self {
            Self::Root | Self::NotFound => Some(Self::Dashboard),
            Self::Admin => Some(Self::AdminSection(AdminTab::Projects)),
            _ => None,
        }
    }

    /// 是否渲染在侧边栏布局中
    pub fn uses_layout(&self) -> bool {
        !matches!(self.access(), Access::GuestOnly)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功（或权限不足）时的默认目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
