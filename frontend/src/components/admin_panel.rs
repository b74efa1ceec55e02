//! 管理面板 (`/admin/{projects,users,stats}`)
//!
//! 标签页即路由：切换标签通过路由服务导航，地址栏始终反映当前标签。

mod projects_tab;
mod users_tab;

use leptos::prelude::*;

use crate::components::icons::{BarChart, ShieldCheck};
use crate::components::notice::{Notice, NoticeBanner};
use crate::web::route::AdminTab;
use crate::web::router::Link;

use projects_tab::ProjectsTab;
use users_tab::UsersTab;

#[component]
pub fn AdminPanel(tab: AdminTab) -> impl IntoView {
    let notice = RwSignal::new(None::<Notice>);

    let content = match tab {
        AdminTab::Projects => view! { <ProjectsTab notice=notice /> }.into_any(),
        AdminTab::Users => view! { <UsersTab notice=notice /> }.into_any(),
        AdminTab::Stats => view! { <StatsTab /> }.into_any(),
    };

    view! {
        <div class="space-y-6">
            <header class="space-y-1">
                <div class="flex items-center gap-2 text-primary text-xs font-semibold uppercase tracking-wide">
                    <ShieldCheck class="h-4 w-4" /> "Administration"
                </div>
                <h1 class="text-3xl font-bold">"Admin Panel"</h1>
                <p class="text-base-content/70">"Manage projects, tasks and users."</p>
            </header>

            <div role="tablist" class="tabs tabs-boxed w-fit">
                {AdminTab::ALL
                    .into_iter()
                    .map(|t| {
                        let class = if t == tab { "tab tab-active" } else { "tab" };
                        view! {
                            <Link to=format!("/admin/{}", t.slug()) class=class>
                                {t.label()}
                            </Link>
                        }
                    })
                    .collect_view()}
            </div>

            <NoticeBanner notice=notice />

            {content}
        </div>
    }
}

#[component]
fn StatsTab() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow p-16 text-center">
            <BarChart class="h-10 w-10 mx-auto opacity-30 mb-4" />
            <p class="text-base-content/70">"No additional metrics configured yet."</p>
        </div>
    }
}
