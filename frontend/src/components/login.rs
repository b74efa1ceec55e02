//! 登录页

use leptos::prelude::*;
use leptos::task::spawn_local;
use promanager_shared::LoginRequest;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::icons::ShieldCheck;
use crate::components::notice::{Notice, NoticeBanner, report_error};
use crate::components::ui::{Button, ButtonVariant, Input};
use crate::web::router::Link;

const LOGIN_FAILED: &str = "Invalid email or password. Please try again.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(None::<Notice>);

    // 登录成功后的跳转由路由服务处理（返回之前请求的页面）
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        notice.set(None);

        let credentials = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            match api.login(&credentials).await {
                Ok(res) => auth.login(&res),
                Err(e) => report_error(notice, "Login", &e, LOGIN_FAILED),
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
                            <ShieldCheck class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Sign In"</h1>
                        <p class="text-base-content/70">"Welcome back to ProManager"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <NoticeBanner notice=notice />

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
                            placeholder="••••••••"
                            value=password
                            required=true
                        />

                        <div class="form-control mt-6">
                            <Button variant=ButtonVariant::Primary button_type="submit" disabled=is_submitting>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </Button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Don't have an account? "
                            <Link to="/register" class="link link-primary">"Create one"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
