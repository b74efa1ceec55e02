//! 用户标签页：用户的增删改
//!
//! 新建用户复用注册接口；编辑不修改密码。

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::{Role, User};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::form_state::UserFormState;
use crate::components::icons::{Pencil, Trash, Users};
use crate::components::notice::{Notice, report_error};
use crate::components::ui::{Button, ButtonVariant, Card, Input};
use crate::web::confirm;

const PAGE: &str = "AdminUsers";

#[component]
pub fn UsersTab(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let api = use_api();
    let state = UserFormState::new();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        spawn_local(async move {
            match api.get_users().await {
                Ok(data) => set_users.set(data),
                Err(e) => report_error(notice, PAGE, &e, "Failed to load users"),
            }
            set_loading.set(false);
        });
    });

    let on_saved = Callback::new(move |message: &'static str| {
        state.reset();
        notice.set(Some(Notice::success(message)));
        reload.update(|n| *n += 1);
    });

    let on_edit = Callback::new(move |user: User| {
        notice.set(None);
        state.edit(&user);
    });

    let on_delete = Callback::new(move |id: u64| {
        if !confirm("Delete this user?") {
            return;
        }
        notice.set(None);
        spawn_local(async move {
            match api.delete_user(id).await {
                Ok(()) => {
                    if state.editing.get_untracked() == Some(id) {
                        state.reset();
                    }
                    notice.set(Some(Notice::success("User deleted")));
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_error(notice, PAGE, &e, "Failed to delete user"),
            }
        });
    });

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            <UserForm state=state notice=notice on_saved=on_saved />
            <div class="lg:col-span-2">
                <UserList users=users loading=loading on_edit=on_edit on_delete=on_delete />
            </div>
        </div>
    }
}

#[component]
fn UserForm(
    state: UserFormState,
    notice: RwSignal<Option<Notice>>,
    on_saved: Callback<&'static str>,
) -> impl IntoView {
    let api = use_api();
    let (saving, set_saving) = signal(false);
    let editing = move || state.editing.get().is_some();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = state.draft();
        let editing_id = state.editing.get_untracked();

        let prepared = match editing_id {
            Some(id) => draft.into_update().map(|req| (Some((id, req)), None)),
            None => draft.into_register().map(|req| (None, Some(req))),
        };
        let (update, create) = match prepared {
            Ok(pair) => pair,
            Err(msg) => {
                notice.set(Some(Notice::error(msg)));
                return;
            }
        };

        set_saving.set(true);
        spawn_local(async move {
            if let Some((id, req)) = update {
                match api.update_user(id, req).await {
                    Ok(_) => on_saved.run("User updated"),
                    Err(e) => report_error(notice, PAGE, &e, "Failed to update user"),
                }
            } else if let Some(req) = create {
                match api.create_user(&req).await {
                    Ok(_) => on_saved.run("User created"),
                    Err(e) => report_error(notice, PAGE, &e, "Failed to create user"),
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <Card>
            <h2 class="card-title">
                {move || if editing() { "Edit user" } else { "New user" }}
            </h2>
            <form on:submit=on_submit class="space-y-3">
                <Input label="Name" id="user_name" value=state.name required=true />
                <Input label="Email" id="user_email" input_type="email" value=state.email required=true />
                <Show when=move || !editing()>
                    <Input label="Password" id="user_password" input_type="password" value=state.password />
                </Show>
                <div class="form-control w-full">
                    <label class="label" for="user_role">
                        <span class="label-text">"Role"</span>
                    </label>
                    <select
                        id="user_role"
                        class="select select-bordered w-full"
                        prop:value=move || state.role.get().as_str()
                        on:change=move |ev| {
                            if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                state.role.set(role);
                            }
                        }
                    >
                        <option value=Role::User.as_str()>"User"</option>
                        <option value=Role::Admin.as_str()>"Admin"</option>
                    </select>
                </div>
                <div class="flex gap-2">
                    <Button button_type="submit" disabled=saving class="flex-1">
                        {move || if editing() { "Save changes" } else { "Create user" }}
                    </Button>
                    <Show when=editing>
                        <Button variant=ButtonVariant::Secondary on_click=Callback::new(move |_| state.reset())>
                            "Cancel"
                        </Button>
                    </Show>
                </div>
            </form>
        </Card>
    }
}

#[component]
fn UserList(
    users: ReadSignal<Vec<User>>,
    loading: ReadSignal<bool>,
    on_edit: Callback<User>,
    on_delete: Callback<u64>,
) -> impl IntoView {
    let auth = use_auth();
    let self_id = move || auth.session().map(|s| s.id);

    view! {
        <Card>
            <h2 class="card-title gap-2"><Users class="h-5 w-5" /> "Users"</h2>
            {move || {
                if loading.get() {
                    return view! { <span class="loading loading-spinner loading-md mx-auto my-8"></span> }.into_any();
                }
                if users.with(Vec::is_empty) {
                    return view! { <p class="text-center text-base-content/70 py-8">"No users found."</p> }.into_any();
                }
                view! {
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.get()
                                    key=|u| (u.id, u.name.clone(), u.email.clone(), u.role)
                                    children=move |user| {
                                        let id = user.id;
                                        let is_self = move || self_id() == Some(id);
                                        let badge = if user.role.is_admin() { "badge badge-primary" } else { "badge badge-ghost" };
                                        let initial = user.initial();
                                        let edit_target = user.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="flex items-center gap-3">
                                                        <div class="avatar placeholder">
                                                            <div class="bg-base-300 rounded-full w-8">
                                                                <span class="text-xs">{initial}</span>
                                                            </div>
                                                        </div>
                                                        <span class="font-medium">{user.name}</span>
                                                    </div>
                                                </td>
                                                <td>{user.email}</td>
                                                <td><span class=badge>{user.role.as_str()}</span></td>
                                                <td class="flex justify-end gap-1">
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        on_click=Callback::new(move |_| on_edit.run(edit_target.clone()))
                                                    >
                                                        <Pencil class="h-4 w-4" />
                                                    </Button>
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        class="text-error"
                                                        disabled=Signal::derive(is_self)
                                                        on_click=Callback::new(move |_| on_delete.run(id))
                                                    >
                                                        <Trash class="h-4 w-4" />
                                                    </Button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </Card>
    }
}
