//! 当前用户的任务列表（普通用户的 `/dashboard`）

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::date::format_due_date;
use promanager_shared::{Task, TaskStatus};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::board::{TaskSummary, card_key, next_actions};
use crate::components::icons::{CheckCircle, Clock, ListChecks};
use crate::components::notice::{Notice, NoticeBanner, report_error};

const STATUS_FAILED: &str = "Failed to update task status";

/// 状态徽章样式
pub fn status_badge_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "badge badge-success badge-outline",
        TaskStatus::InProgress => "badge badge-warning badge-outline",
        TaskStatus::Todo => "badge badge-ghost",
    }
}

#[component]
pub fn MyTasksPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let (tasks, set_tasks) = signal(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);
    let notice = RwSignal::new(None::<Notice>);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        let Some(user) = auth.session() else {
            return;
        };
        spawn_local(async move {
            match api.get_tasks_by_user(user.id).await {
                Ok(data) => set_tasks.set(data),
                Err(e) => report_error(notice, "MyTasks", &e, "Failed to load tasks"),
            }
            set_loading.set(false);
        });
    });

    let on_status = Callback::new(move |(id, status): (u64, TaskStatus)| {
        notice.set(None);
        spawn_local(async move {
            match api.update_task_status(id, status).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => report_error(notice, "MyTasks", &e, STATUS_FAILED),
            }
        });
    });

    let summary = Memo::new(move |_| tasks.with(|t| TaskSummary::from_tasks(t)));
    let user_name = move || auth.session().map(|s| s.name).unwrap_or_default();

    view! {
        <div class="space-y-8">
            <header class="space-y-1">
                <h1 class="text-2xl sm:text-3xl font-bold">"My Tasks"</h1>
                <p class="text-base-content/70">"Tasks currently assigned to " {user_name} "."</p>
            </header>

            <NoticeBanner notice=notice />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-base-content/50"><ListChecks class="h-5 w-5" /></div>
                    <div class="stat-title">"Total"</div>
                    <div class="stat-value">{move || summary.get().total}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-warning"><Clock class="h-5 w-5" /></div>
                    <div class="stat-title">"In progress"</div>
                    <div class="stat-value">{move || summary.get().count(TaskStatus::InProgress)}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-success"><CheckCircle class="h-5 w-5" /></div>
                    <div class="stat-title">"Done"</div>
                    <div class="stat-value">{move || summary.get().count(TaskStatus::Done)}</div>
                </div>
            </div>

            <section class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold">"Task list"</h2>
                    <span class="text-sm text-base-content/70">{move || summary.get().total} " total"</span>
                </div>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                        .into_any()
                    } else if tasks.with(Vec::is_empty) {
                        view! {
                            <div class="card bg-base-100 p-10 text-center">
                                <p class="text-base-content/70">"No tasks assigned right now."</p>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                                <For
                                    each=move || tasks.get()
                                    key=card_key
                                    children=move |task| view! { <MyTaskCard task=task on_status=on_status /> }
                                />
                            </div>
                        }
                        .into_any()
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn MyTaskCard(task: Task, on_status: Callback<(u64, TaskStatus)>) -> impl IntoView {
    let id = task.id;
    let description = task
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description provided.".to_string());

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-5">
                <div class="flex flex-wrap items-center gap-2 mb-1">
                    {task.project_title.clone().map(|title| view! {
                        <span class="badge badge-outline">{title}</span>
                    })}
                    <span class=status_badge_class(task.status)>{task.status.badge_text()}</span>
                </div>
                <h3 class="font-semibold truncate">{task.title.clone()}</h3>
                <p class="text-sm text-base-content/70 line-clamp-3">{description}</p>

                <div class="mt-4 pt-4 border-t border-base-300 flex flex-wrap items-center justify-between gap-3">
                    <div class="text-sm text-base-content/70 flex items-center gap-2">
                        <Clock class="h-4 w-4" />
                        <span>{format_due_date(task.due_date)}</span>
                    </div>
                    <div class="flex gap-2">
                        {next_actions(task.status)
                            .into_iter()
                            .map(|action| view! {
                                <button
                                    class="btn btn-sm btn-outline"
                                    on:click=move |_| on_status.run((id, action.target))
                                >
                                    {action.label}
                                </button>
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
