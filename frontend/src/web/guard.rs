//! 路由守卫 - 状态机
//!
//! 守卫只依赖会话派生出的 `GuardState` 和目标路由，
//! 通过纯函数 `decide` 给出单步决策，`resolve` 跟随重定向链得到最终结果。

use promanager_shared::Session;

use super::route::{Access, AppRoute};

/// 重定向链的最大跳数
const MAX_REDIRECTS: usize = 4;

/// 守卫状态：`Loading → {Anonymous, Member, Admin}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// 会话尚未恢复
    Loading,
    Anonymous,
    Member,
    Admin,
}

impl GuardState {
    pub fn from_session(loading: bool, session: Option<&Session>) -> Self {
        match (loading, session) {
            (true, _) => GuardState::Loading,
            (false, None) => GuardState::Anonymous,
            (false, Some(s)) if s.is_admin() => GuardState::Admin,
            (false, Some(_)) => GuardState::Member,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, GuardState::Member | GuardState::Admin)
    }
}

/// 单步决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 显示加载指示器，不导航
    Wait,
    /// 渲染目标路由
    Render,
    /// 重定向；`remember` 为登录后需要返回的路径
    Redirect {
        to: String,
        remember: Option<String>,
    },
}

impl Decision {
    fn redirect(to: AppRoute) -> Self {
        Decision::Redirect {
            to: to.to_path(),
            remember: None,
        }
    }
}

/// **核心转移函数**
///
/// * `requested_path` - 用户请求的完整路径（含查询串），未登录时被记住
/// * `return_to` - 之前记住的路径，登录后离开访客页时使用
pub fn decide(
    state: GuardState,
    route: &AppRoute,
    requested_path: &str,
    return_to: Option<&str>,
) -> Decision {
    if let Some(target) = route.alias_target() {
        return Decision::redirect(target);
    }

    if state == GuardState::Loading {
        return Decision::Wait;
    }

    match (route.access(), state) {
        (Access::Member | Access::AdminOnly, GuardState::Anonymous) => Decision::Redirect {
            to: AppRoute::auth_failure_redirect().to_path(),
            remember: Some(requested_path.to_string()),
        },
        (Access::AdminOnly, GuardState::Member) => {
            Decision::redirect(AppRoute::auth_success_redirect())
        }
        (Access::GuestOnly, GuardState::Member | GuardState::Admin) => match route {
            AppRoute::Login | AppRoute::Register => Decision::Redirect {
                to: return_target(return_to),
                remember: None,
            },
            _ => Decision::redirect(AppRoute::auth_success_redirect()),
        },
        _ => Decision::Render,
    }
}

/// 登录后的返回目标：只接受站内且不是访客页的路径
fn return_target(return_to: Option<&str>) -> String {
    return_to
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .filter(|path| AppRoute::from_path(path).access() != Access::GuestOnly)
        .map(str::to_string)
        .unwrap_or_else(|| AppRoute::auth_success_redirect().to_path())
}

/// 守卫的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Wait,
    Render {
        route: AppRoute,
        /// 最终落地的路径
        path: String,
        /// 是否经过了重定向（需要更新地址栏）
        redirected: bool,
        /// 链上记住的返回路径
        remember: Option<String>,
    },
}

/// 跟随重定向链直到可以渲染或需要等待
pub fn resolve(state: GuardState, path: &str, return_to: Option<&str>) -> Resolution {
    let mut path = path.to_string();
    let mut redirected = false;
    let mut remember: Option<String> = None;

    for _ in 0..=MAX_REDIRECTS {
        let route = AppRoute::from_path(&path);
        match decide(state, &route, &path, return_to) {
            Decision::Wait => return Resolution::Wait,
            Decision::Render => {
                return Resolution::Render {
                    route,
                    path,
                    redirected,
                    remember,
                };
            }
            Decision::Redirect { to, remember: r } => {
                if r.is_some() {
                    remember = r;
                }
                path = to;
                redirected = true;
            }
        }
    }

    // 正常的路由表不会出现超长的链
    let route = if state.is_authenticated() {
        AppRoute::auth_success_redirect()
    } else {
        AppRoute::auth_failure_redirect()
    };
    Resolution::Render {
        route,
        path: route.to_path(),
        redirected: true,
        remember,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::route::AdminTab;
    use promanager_shared::Role;

    fn session(role: Role) -> Session {
        Session {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            role,
        }
    }

    fn rendered(resolution: Resolution) -> (AppRoute, String, Option<String>) {
        match resolution {
            Resolution::Render {
                route,
                path,
                remember,
                ..
            } => (route, path, remember),
            Resolution::Wait => panic!("expected a rendered route"),
        }
    }

    #[test]
    fn test_guard_state_from_session() {
        let admin = session(Role::Admin);
        let user = session(Role::User);
        assert_eq!(GuardState::from_session(true, Some(&admin)), GuardState::Loading);
        assert_eq!(GuardState::from_session(false, None), GuardState::Anonymous);
        assert_eq!(GuardState::from_session(false, Some(&user)), GuardState::Member);
        assert_eq!(GuardState::from_session(false, Some(&admin)), GuardState::Admin);
    }

    #[test]
    fn test_loading_waits() {
        assert_eq!(
            decide(GuardState::Loading, &AppRoute::Projects, "/projects", None),
            Decision::Wait
        );
        assert_eq!(resolve(GuardState::Loading, "/project/3", None), Resolution::Wait);
    }

    #[test]
    fn test_anonymous_is_sent_to_login_with_requested_path() {
        for path in ["/dashboard", "/projects", "/project/3?view=board", "/admin/users"] {
            let (route, landed, remember) = rendered(resolve(GuardState::Anonymous, path, None));
            assert_eq!(route, AppRoute::Login);
            assert_eq!(landed, "/login");
            assert_eq!(remember.as_deref(), Some(path));
        }
    }

    #[test]
    fn test_member_is_kept_out_of_admin() {
        for path in ["/admin", "/admin/projects", "/admin/users", "/admin/stats"] {
            let (route, landed, remember) = rendered(resolve(GuardState::Member, path, None));
            assert_eq!(route, AppRoute::Dashboard);
            assert_eq!(landed, "/dashboard");
            assert_eq!(remember, None);
        }
    }

    #[test]
    fn test_admin_reaches_admin_sections() {
        let resolution = resolve(GuardState::Admin, "/admin", None);
        assert_eq!(
            resolution,
            Resolution::Render {
                route: AppRoute::AdminSection(AdminTab::Projects),
                path: "/admin/projects".to_string(),
                redirected: true,
                remember: None,
            }
        );
        let (route, _, _) = rendered(resolve(GuardState::Admin, "/admin/stats", None));
        assert_eq!(route, AppRoute::AdminSection(AdminTab::Stats));
    }

    #[test]
    fn test_protected_route_renders_for_member() {
        assert_eq!(
            resolve(GuardState::Member, "/project/5", None),
            Resolution::Render {
                route: AppRoute::Project(5),
                path: "/project/5".to_string(),
                redirected: false,
                remember: None,
            }
        );
    }

    #[test]
    fn test_root_and_unknown_paths_forward_to_dashboard() {
        let (route, _, _) = rendered(resolve(GuardState::Member, "/", None));
        assert_eq!(route, AppRoute::Dashboard);
        let (route, _, _) = rendered(resolve(GuardState::Admin, "/does/not/exist", None));
        assert_eq!(route, AppRoute::Dashboard);

        // 未登录时先转发，再被要求登录
        let (route, _, remember) = rendered(resolve(GuardState::Anonymous, "/", None));
        assert_eq!(route, AppRoute::Login);
        assert_eq!(remember.as_deref(), Some("/dashboard"));
    }

    #[test]
    fn test_login_returns_to_remembered_path() {
        let (route, landed, _) = rendered(resolve(GuardState::Member, "/login", Some("/project/3")));
        assert_eq!(route, AppRoute::Project(3));
        assert_eq!(landed, "/project/3");

        let (route, _, _) = rendered(resolve(GuardState::Member, "/register", None));
        assert_eq!(route, AppRoute::Dashboard);
    }

    #[test]
    fn test_remembered_admin_path_is_still_guarded() {
        let (route, _, _) = rendered(resolve(GuardState::Member, "/login", Some("/admin/users")));
        assert_eq!(route, AppRoute::Dashboard);

        let (route, _, _) = rendered(resolve(GuardState::Admin, "/login", Some("/admin/users")));
        assert_eq!(route, AppRoute::AdminSection(AdminTab::Users));
    }

    #[test]
    fn test_unsafe_return_paths_are_ignored() {
        assert_eq!(return_target(Some("https://evil.example")), "/dashboard");
        assert_eq!(return_target(Some("//evil.example")), "/dashboard");
        assert_eq!(return_target(Some("/login")), "/dashboard");
        assert_eq!(return_target(Some("/projects")), "/projects");
    }

    #[test]
    fn test_authenticated_welcome_goes_to_dashboard() {
        let (route, _, _) = rendered(resolve(GuardState::Member, "/welcome", Some("/projects")));
        assert_eq!(route, AppRoute::Dashboard);
    }

    #[test]
    fn test_anonymous_guest_pages_render() {
        for (path, expected) in [
            ("/welcome", AppRoute::Welcome),
            ("/login", AppRoute::Login),
            ("/register", AppRoute::Register),
        ] {
            assert_eq!(
                resolve(GuardState::Anonymous, path, None),
                Resolution::Render {
                    route: expected,
                    path: path.to_string(),
                    redirected: false,
                    remember: None,
                }
            );
        }
    }
}
