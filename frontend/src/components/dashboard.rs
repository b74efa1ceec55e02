//! 项目网格 (`/projects`)

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::Project;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::{ArrowRight, Folder, LayoutDashboard, Plus};
use crate::components::notice::{Notice, NoticeBanner, report_error};
use crate::web::router::Link;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let notice = RwSignal::new(None::<Notice>);

    Effect::new(move |_| {
        spawn_local(async move {
            match api.get_projects().await {
                Ok(data) => set_projects.set(data),
                Err(e) => report_error(notice, "Dashboard", &e, "Failed to load projects"),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            <header class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <div class="flex items-center gap-2 text-primary text-xs font-semibold uppercase tracking-wide mb-2">
                        <LayoutDashboard class="h-4 w-4" /> "Dashboard"
                    </div>
                    <h1 class="text-3xl font-bold">"Projects"</h1>
                    <p class="text-base-content/70 mt-1">"Manage and track all your projects in one place."</p>
                </div>
                <Show when=move || auth.is_admin()>
                    <Link to="/admin/projects" class="btn btn-primary gap-2 whitespace-nowrap">
                        <Plus class="h-4 w-4" /> "New Project"
                    </Link>
                </Show>
            </header>

            <NoticeBanner notice=notice />

            {move || {
                if loading.get() {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {(0..3).map(|_| view! { <div class="skeleton h-52 w-full"></div> }).collect_view()}
                        </div>
                    }
                    .into_any()
                } else if projects.with(Vec::is_empty) {
                    view! {
                        <div class="card bg-base-100 p-16 text-center">
                            <Folder class="h-10 w-10 mx-auto opacity-30 mb-4" />
                            <p class="text-base-content/70">"No projects yet. Create one to get started."</p>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-6">
                            <For
                                each=move || projects.get()
                                key=|project| project.id
                                children=move |project| view! { <ProjectCard project=project /> }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let initial = project.owner_initial();
    let description = project
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description provided.".to_string());

    view! {
        <Link to=format!("/project/{}", project.id) class="group">
            <div class="card bg-base-100 shadow hover:shadow-xl transition-shadow h-full">
                <div class="card-body">
                    <div class="flex justify-between items-start mb-2">
                        <div class="p-2 bg-primary/10 rounded-lg text-primary">
                            <Folder class="h-5 w-5" />
                        </div>
                        <div class="avatar placeholder">
                            <div class="bg-primary/10 text-primary rounded-full w-8">
                                <span class="text-xs font-semibold">{initial}</span>
                            </div>
                        </div>
                    </div>
                    <h3 class="card-title group-hover:text-primary">{project.title}</h3>
                    <p class="text-sm text-base-content/70 line-clamp-2">{description}</p>
                    <div class="mt-4 pt-4 border-t border-base-300 flex items-center justify-between text-sm text-base-content/70">
                        <span>{project.task_count} " Tasks"</span>
                        <span class="flex items-center gap-1 group-hover:text-primary">
                            "View" <ArrowRight class="h-4 w-4" />
                        </span>
                    </div>
                </div>
            </div>
        </Link>
    }
}
