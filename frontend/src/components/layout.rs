//! 已登录页面的外壳：侧边栏 + 内容区

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{
    BarChart, Folder, LayoutDashboard, LogOut, Menu, Moon, Sun, Users, X,
};
use crate::theme::use_theme;
use crate::web::route::AdminTab;
use crate::web::router::{Link, use_router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavIcon {
    Dashboard,
    Projects,
    Users,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavItem {
    label: &'static str,
    href: &'static str,
    icon: NavIcon,
}

const DASHBOARD: NavItem = NavItem {
    label: "Dashboard",
    href: "/dashboard",
    icon: NavIcon::Dashboard,
};

/// 菜单分组：`(标题, 条目)`
fn menu_sections(is_admin: bool) -> Vec<(Option<&'static str>, Vec<NavItem>)> {
    if is_admin {
        let admin = AdminTab::ALL
            .into_iter()
            .map(|tab| NavItem {
                label: tab.label(),
                href: match tab {
                    AdminTab::Projects => "/admin/projects",
                    AdminTab::Users => "/admin/users",
                    AdminTab::Stats => "/admin/stats",
                },
                icon: match tab {
                    AdminTab::Projects => NavIcon::Projects,
                    AdminTab::Users => NavIcon::Users,
                    AdminTab::Stats => NavIcon::Stats,
                },
            })
            .collect();
        vec![(None, vec![DASHBOARD]), (Some("Admin"), admin)]
    } else {
        vec![(
            None,
            vec![
                DASHBOARD,
                NavItem {
                    label: "Projects",
                    href: "/projects",
                    icon: NavIcon::Projects,
                },
            ],
        )]
    }
}

/// 当前路径是否落在菜单项之下（`/project/3` 归属 `/projects`）
fn is_active(current: &str, href: &str) -> bool {
    let path = current.split(['?', '#']).next().unwrap_or_default();
    if href == "/projects" && path.starts_with("/project/") {
        return true;
    }
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <div class="min-h-screen bg-base-200 lg:flex">
            // 移动端顶栏
            <div class="navbar bg-base-100 shadow-sm lg:hidden">
                <button
                    class="btn btn-ghost btn-square"
                    aria-label="Toggle menu"
                    on:click=move |_| set_open.update(|o| *o = !*o)
                >
                    {move || if open.get() {
                        view! { <X class="h-5 w-5" /> }.into_any()
                    } else {
                        view! { <Menu class="h-5 w-5" /> }.into_any()
                    }}
                </button>
                <span class="font-bold text-lg ml-2">"ProManager"</span>
            </div>

            <Sidebar open=open on_navigate=Callback::new(move |_| set_open.set(false)) />

            <main class="flex-1 p-4 sm:p-8 max-w-7xl w-full mx-auto">{children()}</main>
        </div>
    }
}

#[component]
fn Sidebar(open: ReadSignal<bool>, on_navigate: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let theme = use_theme();
    let router = use_router();

    let on_logout = move |_| {
        auth.logout();
        router.navigate("/login");
    };

    let aside_class = move || {
        if open.get() {
            "w-full lg:w-64 bg-base-100 border-r border-base-300 flex flex-col lg:min-h-screen"
        } else {
            "hidden lg:flex w-64 bg-base-100 border-r border-base-300 flex-col min-h-screen"
        }
    };

    let sections = move || {
        menu_sections(auth.is_admin())
            .into_iter()
            .map(|(title, items)| {
                view! {
                    <li>
                        {title.map(|t| view! { <h2 class="menu-title">{t}</h2> })}
                        <ul>
                            {items
                                .into_iter()
                                .map(|item| view! { <NavLink item=item on_navigate=on_navigate /> })
                                .collect_view()}
                        </ul>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <aside class=aside_class>
            <div class="hidden lg:flex items-center gap-2 px-6 h-16 border-b border-base-300">
                <div class="w-8 h-8 bg-primary text-primary-content rounded-lg flex items-center justify-center">
                    <LayoutDashboard class="h-4 w-4" />
                </div>
                <span class="font-bold text-lg">"ProManager"</span>
            </div>

            <ul class="menu flex-1 p-4 gap-1">{sections}</ul>

            <div class="p-4 border-t border-base-300 space-y-2">
                {move || auth.session().map(|s| view! {
                    <div class="flex items-center gap-3 px-2 text-sm">
                        <div class="avatar placeholder">
                            <div class="bg-primary/10 text-primary rounded-full w-9">
                                <span class="font-semibold">{s.initial()}</span>
                            </div>
                        </div>
                        <div class="min-w-0">
                            <p class="font-medium truncate">{s.name}</p>
                            <p class="text-base-content/60 truncate">{s.email}</p>
                        </div>
                    </div>
                })}
                <button class="btn btn-ghost btn-sm w-full justify-start gap-2" on:click=move |_| theme.toggle()>
                    {move || if theme.theme().is_dark() {
                        view! { <Sun class="h-4 w-4" /> "Light mode" }.into_any()
                    } else {
                        view! { <Moon class="h-4 w-4" /> "Dark mode" }.into_any()
                    }}
                </button>
                <button class="btn btn-ghost btn-sm w-full justify-start gap-2 text-error" on:click=on_logout>
                    <LogOut class="h-4 w-4" /> "Sign out"
                </button>
            </div>
        </aside>
    }
}

fn nav_icon(icon: NavIcon) -> AnyView {
    match icon {
        NavIcon::Dashboard => view! { <LayoutDashboard class="h-4 w-4" /> }.into_any(),
        NavIcon::Projects => view! { <Folder class="h-4 w-4" /> }.into_any(),
        NavIcon::Users => view! { <Users class="h-4 w-4" /> }.into_any(),
        NavIcon::Stats => view! { <BarChart class="h-4 w-4" /> }.into_any(),
    }
}

#[component]
fn NavLink(item: NavItem, on_navigate: Callback<()>) -> impl IntoView {
    let router = use_router();
    let active = Memo::new(move |_| is_active(&router.current_path(), item.href));

    view! {
        <li on:click=move |_| on_navigate.run(())>
            {move || {
                let class = if active.get() { "active" } else { "" };
                view! {
                    <Link to=item.href class=class>
                        {nav_icon(item.icon)}
                        {item.label}
                    </Link>
                }
            }}
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(is_admin: bool) -> Vec<&'static str> {
        menu_sections(is_admin)
            .into_iter()
            .flat_map(|(_, items)| items.into_iter().map(|i| i.href))
            .collect()
    }

    #[test]
    fn test_menu_depends_on_role() {
        assert_eq!(hrefs(false), vec!["/dashboard", "/projects"]);
        assert_eq!(
            hrefs(true),
            vec!["/dashboard", "/admin/projects", "/admin/users", "/admin/stats"]
        );
        assert_eq!(menu_sections(true)[1].0, Some("Admin"));
    }

    #[test]
    fn test_active_item() {
        assert!(is_active("/dashboard", "/dashboard"));
        assert!(is_active("/admin/users?page=2", "/admin/users"));
        assert!(is_active("/project/7", "/projects"));
        assert!(!is_active("/projects", "/dashboard"));
        assert!(!is_active("/admin/usersx", "/admin/users"));
    }
}
