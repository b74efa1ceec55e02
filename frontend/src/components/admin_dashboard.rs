//! 管理员总览 (`/dashboard`，管理员)

use futures::future::join;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::board::total_task_count;
use crate::components::icons::{ArrowRight, Folder, ListChecks, Users};
use crate::components::notice::{Notice, NoticeBanner, report_error};
use crate::web::router::Link;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    projects: usize,
    users: usize,
    tasks: u64,
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let totals = RwSignal::new(None::<Totals>);
    let notice = RwSignal::new(None::<Notice>);

    Effect::new(move |_| {
        spawn_local(async move {
            let (projects, users) = join(api.get_projects(), api.get_users()).await;
            let mut next = Totals::default();
            match projects {
                Ok(p) => {
                    next.projects = p.len();
                    next.tasks = total_task_count(&p);
                }
                Err(e) => report_error(notice, "AdminDashboard", &e, "Failed to load projects"),
            }
            match users {
                Ok(u) => next.users = u.len(),
                Err(e) => report_error(notice, "AdminDashboard", &e, "Failed to load users"),
            }
            totals.set(Some(next));
        });
    });

    let stat = move |pick: fn(&Totals) -> u64| {
        move || match totals.get() {
            Some(t) => pick(&t).to_string(),
            None => "…".to_string(),
        }
    };
    let greeting = move || auth.session().map(|s| s.name).unwrap_or_default();

    view! {
        <div class="space-y-8">
            <header class="space-y-1">
                <h1 class="text-2xl sm:text-3xl font-bold">"Welcome back, " {greeting}</h1>
                <p class="text-base-content/70">"Overview of everything in the workspace."</p>
            </header>

            <NoticeBanner notice=notice />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary"><Folder class="h-6 w-6" /></div>
                    <div class="stat-title">"Projects"</div>
                    <div class="stat-value">{stat(|t| t.projects as u64)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary"><Users class="h-6 w-6" /></div>
                    <div class="stat-title">"Users"</div>
                    <div class="stat-value">{stat(|t| t.users as u64)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent"><ListChecks class="h-6 w-6" /></div>
                    <div class="stat-title">"Tasks"</div>
                    <div class="stat-value">{stat(|t| t.tasks)}</div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <QuickLink to="/admin/projects" title="Manage projects" hint="Create projects and assign tasks." />
                <QuickLink to="/admin/users" title="Manage users" hint="Add, edit or remove accounts." />
            </div>
        </div>
    }
}

#[component]
fn QuickLink(to: &'static str, title: &'static str, hint: &'static str) -> impl IntoView {
    view! {
        <Link to=to class="card bg-base-100 shadow hover:shadow-xl transition-shadow group">
            <div class="card-body flex-row items-center justify-between">
                <div>
                    <h2 class="card-title group-hover:text-primary">{title}</h2>
                    <p class="text-sm text-base-content/70">{hint}</p>
                </div>
                <ArrowRight class="h-5 w-5 group-hover:text-primary" />
            </div>
        </Link>
    }
}
