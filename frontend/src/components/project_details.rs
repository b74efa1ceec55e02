//! 项目看板 (`/project/:id`)
//!
//! 三个固定列按状态在客户端过滤；状态修改和删除后整体重新加载。

mod create_task_dialog;

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::date::format_due_date;
use promanager_shared::{Project, Task, TaskStatus, User};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::board::{card_key, column_tasks, requested_status};
use crate::components::icons::{Calendar, ChevronLeft, Circle, Trash, Users};
use crate::components::notice::{Notice, NoticeBanner, report_error};
use crate::logging::log_info;
use crate::web::confirm;
use crate::web::router::use_router;

use create_task_dialog::CreateTaskDialog;

#[component]
pub fn ProjectDetailsPage(project_id: u64) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();

    let (project, set_project) = signal(None::<Project>);
    let (tasks, set_tasks) = signal(Vec::<Task>::new());
    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let notice = RwSignal::new(None::<Notice>);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        let is_admin = auth.is_admin();
        spawn_local(async move {
            let load = api.load_board(project_id, is_admin).await;
            match load.board {
                Ok((p, t)) => {
                    set_project.set(Some(p));
                    set_tasks.set(t);
                }
                Err(e) => report_error(notice, "ProjectDetails", &e, "Failed to load project"),
            }
            // 仅管理员需要用户列表（任务分配）
            match load.users {
                Some(Ok(list)) => set_users.set(list),
                Some(Err(e)) => report_error(notice, "ProjectDetails", &e, "Failed to load users"),
                None => {}
            }
            set_loading.set(false);
        });
    });

    let on_status = Callback::new(move |(id, status): (u64, TaskStatus)| {
        spawn_local(async move {
            match api.update_task_status(id, status).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => report_error(notice, "ProjectDetails", &e, "Failed to update task status"),
            }
        });
    });

    let on_delete_task = Callback::new(move |id: u64| {
        if !confirm("Delete this task?") {
            return;
        }
        spawn_local(async move {
            match api.delete_task(id).await {
                Ok(()) => {
                    notice.set(Some(Notice::success("Task deleted")));
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_error(notice, "ProjectDetails", &e, "Failed to delete task"),
            }
        });
    });

    let on_task_created = Callback::new(move |list: Vec<Task>| {
        set_tasks.set(list);
        notice.set(Some(Notice::success("Task created")));
    });

    let on_delete_project = move |_| {
        if !confirm("Permanently delete this project and all of its tasks?") {
            return;
        }
        spawn_local(async move {
            match api.delete_project(project_id).await {
                Ok(()) => {
                    log_info!("[ProjectDetails] deleted project {}", project_id);
                    router.navigate("/dashboard");
                }
                Err(e) => report_error(notice, "ProjectDetails", &e, "Failed to delete project"),
            }
        });
    };

    let title = move || project.with(|p| p.as_ref().map(|p| p.title.clone()).unwrap_or_default());
    let description = move || project.with(|p| p.as_ref().and_then(|p| p.description.clone()));
    let owner = move || {
        project.with(|p| {
            p.as_ref()
                .and_then(|p| p.owner_name.clone())
                .unwrap_or_else(|| "Unassigned".to_string())
        })
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <div class="space-y-8 pb-8">
                <header class="flex flex-col lg:flex-row lg:items-start justify-between gap-6 pb-6 border-b border-base-300">
                    <div class="space-y-2">
                        <button class="btn btn-ghost btn-sm px-0 gap-1" on:click=move |_| router.back()>
                            <ChevronLeft class="h-4 w-4" /> "Back"
                        </button>
                        <h1 class="text-2xl sm:text-3xl font-bold">{title}</h1>
                        {move || description().map(|d| view! { <p class="text-base-content/70 max-w-3xl">{d}</p> })}
                        <div class="flex flex-wrap items-center gap-3 text-sm text-base-content/70 mt-2">
                            <span class="inline-flex items-center gap-2"><Users class="h-4 w-4" /> {owner}</span>
                            <span class="inline-flex items-center gap-2">
                                <Circle class="h-4 w-4" /> {move || tasks.with(Vec::len)} " tasks"
                            </span>
                        </div>
                    </div>

                    <Show when=move || auth.is_admin()>
                        <div class="flex gap-2">
                            <CreateTaskDialog
                                project_id=project_id
                                users=users
                                on_created=on_task_created
                                notice=notice
                            />
                            <button class="btn btn-outline btn-error gap-2" on:click=on_delete_project>
                                <Trash class="h-4 w-4" /> "Delete project"
                            </button>
                        </div>
                    </Show>
                </header>

                <NoticeBanner notice=notice />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-4 items-start">
                    {TaskStatus::ALL
                        .into_iter()
                        .map(|status| view! {
                            <BoardColumn
                                status=status
                                tasks=tasks
                                on_status=on_status
                                on_delete=on_delete_task
                            />
                        })
                        .collect_view()}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn BoardColumn(
    status: TaskStatus,
    tasks: ReadSignal<Vec<Task>>,
    on_status: Callback<(u64, TaskStatus)>,
    on_delete: Callback<u64>,
) -> impl IntoView {
    let column = Memo::new(move |_| tasks.with(|t| column_tasks(t, status)));

    view! {
        <div class="space-y-3">
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-4 flex-row items-center justify-between">
                    <h2 class="text-sm font-semibold">{status.label()}</h2>
                    <span class="badge badge-outline">{move || column.with(Vec::len)}</span>
                </div>
            </div>
            <div class="space-y-3 min-h-[240px]">
                <For
                    each=move || column.get()
                    key=card_key
                    children=move |task| view! { <TaskCard task=task on_status=on_status on_delete=on_delete /> }
                />
            </div>
        </div>
    }
}

#[component]
fn TaskCard(
    task: Task,
    on_status: Callback<(u64, TaskStatus)>,
    on_delete: Callback<u64>,
) -> impl IntoView {
    let auth = use_auth();
    let id = task.id;
    let current = task.status;
    let description = task
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description provided.".to_string());

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-5">
                <div class="flex items-start justify-between gap-3">
                    <h4 class="font-semibold">{task.title.clone()}</h4>
                    <span class="text-xs text-base-content/50">"#" {id}</span>
                </div>
                <p class="text-sm text-base-content/70 line-clamp-3">{description}</p>

                <div class="mt-2 flex flex-wrap gap-2">
                    {task.due_date.map(|date| view! {
                        <span class="badge badge-outline gap-1">
                            <Calendar class="h-3 w-3" /> {format_due_date(Some(date))}
                        </span>
                    })}
                    {task.assigned_user_name.clone().map(|name| view! {
                        <span class="badge badge-outline gap-1"><Users class="h-3 w-3" /> {name}</span>
                    })}
                </div>

                <div class="mt-4 pt-4 border-t border-base-300 flex items-end gap-2">
                    <label class="form-control flex-1">
                        <span class="label-text text-xs">"Move to"</span>
                        <select
                            class="select select-bordered select-sm mt-1"
                            on:change=move |ev| {
                                let requested = requested_status(current, &event_target_value(&ev));
                                // 选择框始终显示服务端状态；成功后重新加载会把卡片移到新列
                                event_target::<web_sys::HtmlSelectElement>(&ev).set_value(current.as_str());
                                if let Some(next) = requested {
                                    on_status.run((id, next));
                                }
                            }
                        >
                            {TaskStatus::ALL
                                .into_iter()
                                .map(|s| view! {
                                    <option value=s.as_str() selected=s == current>{s.label()}</option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <Show when=move || auth.is_admin()>
                        <button
                            class="btn btn-ghost btn-sm text-error"
                            title="Delete task"
                            on:click=move |_| on_delete.run(id)
                        >
                            <Trash class="h-4 w-4" />
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
