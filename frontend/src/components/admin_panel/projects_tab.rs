//! 项目标签页：新建项目、新建任务、项目列表

use futures::future::join;
use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::{Project, User};

use crate::api::use_api;
use crate::board::total_task_count;
use crate::components::form_state::{ProjectFormState, TaskFormState};
use crate::components::icons::{Folder, Plus, Trash};
use crate::components::notice::{Notice, report_error};
use crate::components::ui::{Button, ButtonVariant, Card, Input};
use crate::web::confirm;
use crate::web::router::Link;

const PAGE: &str = "AdminProjects";

#[component]
pub fn ProjectsTab(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let api = use_api();

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        spawn_local(async move {
            let (projects_res, users_res) = join(api.get_projects(), api.get_users()).await;
            match projects_res {
                Ok(data) => set_projects.set(data),
                Err(e) => report_error(notice, PAGE, &e, "Failed to load projects"),
            }
            match users_res {
                Ok(data) => set_users.set(data),
                Err(e) => report_error(notice, PAGE, &e, "Failed to load users"),
            }
            set_loading.set(false);
        });
    });

    let on_changed = Callback::new(move |message: &'static str| {
        notice.set(Some(Notice::success(message)));
        reload.update(|n| *n += 1);
    });

    let on_delete = Callback::new(move |id: u64| {
        if !confirm("Delete this project?") {
            return;
        }
        notice.set(None);
        spawn_local(async move {
            match api.delete_project_and_list(id).await {
                Ok(list) => {
                    set_projects.set(list);
                    notice.set(Some(Notice::success("Project deleted")));
                }
                Err(e) => report_error(notice, PAGE, &e, "Failed to delete project"),
            }
        });
    });

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <CreateProjectForm notice=notice on_created=on_changed />
            <CreateTaskForm projects=projects users=users notice=notice on_created=on_changed />
        </div>

        <Card>
            <div class="flex items-center justify-between">
                <h2 class="card-title">"All projects"</h2>
                <span class="text-sm text-base-content/70">
                    {move || projects.with(|p| format!("{} projects, {} tasks", p.len(), total_task_count(p)))}
                </span>
            </div>
            {move || {
                if loading.get() {
                    view! { <span class="loading loading-spinner loading-md mx-auto my-8"></span> }.into_any()
                } else if projects.with(Vec::is_empty) {
                    view! {
                        <p class="text-center text-base-content/70 py-8">"No projects yet."</p>
                    }
                    .into_any()
                } else {
                    view! {
                        <ul class="divide-y divide-base-300">
                            <For
                                each=move || projects.get()
                                key=|project| (project.id, project.task_count)
                                children=move |project| view! {
                                    <ProjectRow project=project on_delete=on_delete />
                                }
                            />
                        </ul>
                    }
                    .into_any()
                }
            }}
        </Card>
    }
}

#[component]
fn ProjectRow(project: Project, on_delete: Callback<u64>) -> impl IntoView {
    let id = project.id;
    view! {
        <li class="flex items-center justify-between gap-4 py-3">
            <div class="flex items-center gap-3 min-w-0">
                <Folder class="h-5 w-5 text-primary shrink-0" />
                <div class="min-w-0">
                    <Link to=format!("/project/{}", id) class="font-medium hover:text-primary truncate">
                        {project.title}
                    </Link>
                    <p class="text-xs text-base-content/60">
                        {project.task_count} " tasks"
                        {project.owner_name.map(|owner| format!(" · {}", owner))}
                    </p>
                </div>
            </div>
            <Button
                variant=ButtonVariant::Danger
                class="btn-sm"
                on_click=Callback::new(move |_| on_delete.run(id))
            >
                <Trash class="h-4 w-4" /> "Delete"
            </Button>
        </li>
    }
}

#[component]
fn CreateProjectForm(
    notice: RwSignal<Option<Notice>>,
    on_created: Callback<&'static str>,
) -> impl IntoView {
    let api = use_api();
    let state = ProjectFormState::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match state.draft().into_request() {
            Ok(req) => req,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        set_saving.set(true);
        spawn_local(async move {
            match api.create_project(req).await {
                Ok(_) => {
                    state.reset();
                    on_created.run("Project created");
                }
                Err(e) => report_error(notice, PAGE, &e, "Failed to create project"),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <h2 class="card-title">"New project"</h2>
            <form on:submit=on_submit class="space-y-3">
                <Input label="Title" id="project_title" value=state.title placeholder="Project title" required=true />
                <div class="form-control w-full">
                    <label class="label" for="project_description">
                        <span class="label-text">"Description"</span>
                    </label>
                    <textarea
                        id="project_description"
                        class="textarea textarea-bordered w-full h-24"
                        placeholder="What is this project about?"
                        prop:value=move || state.description.get()
                        on:input=move |ev| state.description.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <Button button_type="submit" disabled=saving class="w-full">
                    <Plus class="h-4 w-4" /> "Create project"
                </Button>
            </form>
        </Card>
    }
}

#[component]
fn CreateTaskForm(
    projects: ReadSignal<Vec<Project>>,
    users: ReadSignal<Vec<User>>,
    notice: RwSignal<Option<Notice>>,
    on_created: Callback<&'static str>,
) -> impl IntoView {
    let api = use_api();
    let state = TaskFormState::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match state.draft().into_request() {
            Ok(req) => req,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };
        set_saving.set(true);
        spawn_local(async move {
            match api.create_task(req).await {
                Ok(_) => {
                    state.reset(false);
                    on_created.run("Task created");
                }
                Err(e) => report_error(notice, PAGE, &e, "Failed to create task"),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <h2 class="card-title">"New task"</h2>
            <form on:submit=on_submit class="space-y-3">
                <Input label="Title" id="admin_task_title" value=state.title placeholder="Task title" required=true />
                <div class="form-control w-full">
                    <label class="label" for="admin_task_description">
                        <span class="label-text">"Description"</span>
                    </label>
                    <textarea
                        id="admin_task_description"
                        class="textarea textarea-bordered w-full h-20"
                        prop:value=move || state.description.get()
                        on:input=move |ev| state.description.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="grid grid-cols-1 sm:grid-cols-3 gap-3">
                    <div class="form-control">
                        <label class="label" for="admin_task_project">
                            <span class="label-text">"Project"</span>
                        </label>
                        <select
                            id="admin_task_project"
                            required
                            class="select select-bordered w-full"
                            prop:value=move || state.project_id.get()
                            on:change=move |ev| state.project_id.set(event_target_value(&ev))
                        >
                            <option value="">"Select project"</option>
                            <For
                                each=move || projects.get()
                                key=|p| p.id
                                children=|p| view! { <option value=p.id.to_string()>{p.title}</option> }
                            />
                        </select>
                    </div>
                    <div class="form-control">
                        <label class="label" for="admin_task_assignee">
                            <span class="label-text">"Assignee"</span>
                        </label>
                        <select
                            id="admin_task_assignee"
                            class="select select-bordered w-full"
                            prop:value=move || state.assigned_user_id.get()
                            on:change=move |ev| state.assigned_user_id.set(event_target_value(&ev))
                        >
                            <option value="">"Unassigned"</option>
                            <For
                                each=move || users.get()
                                key=|u| u.id
                                children=|u| view! { <option value=u.id.to_string()>{u.name}</option> }
                            />
                        </select>
                    </div>
                    <Input label="Due date" id="admin_task_due" input_type="date" value=state.due_date />
                </div>
                <Button button_type="submit" disabled=saving class="w-full">
                    <Plus class="h-4 w-4" /> "Create task"
                </Button>
            </form>
        </Card>
    }
}
