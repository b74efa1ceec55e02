//! 新建任务对话框（管理员）

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::{Task, User};

use crate::api::use_api;
use crate::components::form_state::TaskFormState;
use crate::components::icons::Plus;
use crate::components::notice::{Notice, report_error};
use crate::logging::log_warn;

#[component]
pub fn CreateTaskDialog(
    project_id: u64,
    /// 可分配的用户
    users: ReadSignal<Vec<User>>,
    /// 创建成功后收到重新拉取的任务列表
    on_created: Callback<Vec<Task>>,
    notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
    let api = use_api();
    let state = TaskFormState::for_project(project_id);
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (form_error, set_form_error) = signal(None::<&'static str>);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        if open.get() {
            if !dialog.open() {
                if let Err(e) = dialog.show_modal() {
                    log_warn!("[CreateTaskDialog] showModal failed: {:?}", e);
                }
            }
        } else if dialog.open() {
            dialog.close();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match state.draft().into_request() {
            Ok(req) => req,
            Err(msg) => {
                set_form_error.set(Some(msg));
                return;
            }
        };
        set_form_error.set(None);
        set_loading.set(true);

        spawn_local(async move {
            match api.create_task_and_list(req).await {
                Ok(tasks) => {
                    state.reset(true);
                    set_open.set(false);
                    on_created.run(tasks);
                }
                Err(e) => {
                    set_open.set(false);
                    report_error(notice, "ProjectDetails", &e, "Failed to create task");
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus class="h-4 w-4" /> "New task"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"New task"</h3>
                <p class="py-2 text-base-content/70">"Create a task in this project and assign it to a user."</p>

                <form on:submit=on_submit class="space-y-4">
                    {move || form_error.get().map(|msg| view! {
                        <div role="alert" class="alert alert-warning text-sm py-2">{msg}</div>
                    })}

                    <div class="form-control">
                        <label for="task_title" class="label">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input id="task_title" required
                            type="text"
                            placeholder="Task title"
                            on:input=move |ev| state.title.set(event_target_value(&ev))
                            prop:value=move || state.title.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="task_description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="task_description"
                            placeholder="Description (optional)"
                            on:input=move |ev| state.description.set(event_target_value(&ev))
                            prop:value=move || state.description.get()
                            class="textarea textarea-bordered w-full h-24"
                        ></textarea>
                    </div>

                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="task_assignee" class="label">
                                <span class="label-text">"Assignee"</span>
                            </label>
                            <select id="task_assignee"
                                class="select select-bordered w-full"
                                on:change=move |ev| state.assigned_user_id.set(event_target_value(&ev))
                                prop:value=move || state.assigned_user_id.get()
                            >
                                <option value="">"Unassigned"</option>
                                <For
                                    each=move || users.get()
                                    key=|user| user.id
                                    children=move |user| view! {
                                        <option value=user.id.to_string()>{user.name}</option>
                                    }
                                />
                            </select>
                        </div>
                        <div class="form-control">
                            <label for="task_due" class="label">
                                <span class="label-text">"Due date"</span>
                            </label>
                            <input id="task_due"
                                type="date"
                                on:input=move |ev| state.due_date.set(event_target_value(&ev))
                                prop:value=move || state.due_date.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>"Cancel"</button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                "Create task".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
