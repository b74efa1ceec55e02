//! 注册页：注册成功后用同一组凭据登录

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::{RegisterRequest, Role};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::Users;
use crate::components::notice::{Notice, NoticeBanner, report_error};
use crate::components::ui::{Button, Input};
use crate::web::router::Link;

const REGISTER_FAILED: &str = "Registration failed. Please try again.";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User);
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(None::<Notice>);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        notice.set(None);

        let registration = RegisterRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        spawn_local(async move {
            let result = match api.register(&registration).await {
                Ok(_) => api.login(&registration.credentials()).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(res) => auth.login(&res),
                Err(e) => report_error(notice, "Register", &e, REGISTER_FAILED),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Users class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create Account"</h1>
                        <p class="text-base-content/70">"Get started for free"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <NoticeBanner notice=notice />

                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                            <Input id="name" label="Full Name" placeholder="John Doe" value=name required=true />
                            <div class="form-control w-full">
                                <label class="label" for="role">
                                    <span class="label-text">"Role"</span>
                                </label>
                                <select
                                    id="role"
                                    class="select select-bordered w-full"
                                    on:change=move |ev| {
                                        role.set(Role::parse(&event_target_value(&ev)).unwrap_or_default());
                                    }
                                >
                                    <option value="USER" selected=move || role.get() == Role::User>"User"</option>
                                    <option value="ADMIN" selected=move || role.get() == Role::Admin>"Admin"</option>
                                </select>
                            </div>
                        </div>
                        <Input
                            id="email"
                            label="Email"
                            input_type="email"
                            placeholder="you@example.com"
                            value=email
                            required=true
                        />
                        <Input
                            id="password"
                            label="Password"
                            input_type="password"
                            placeholder="Create a password"
                            value=password
                            required=true
                        />

                        <div class="form-control mt-6">
                            <Button button_type="submit" disabled=is_submitting>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </Button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
