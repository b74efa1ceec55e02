//! 公开介绍页 (`/welcome`)

use leptos::prelude::*;

use crate::components::icons::{ArrowRight, LayoutDashboard};
use crate::web::router::Link;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <div class="w-16 h-16 bg-primary text-primary-content rounded-2xl flex items-center justify-center mx-auto mb-8">
                        <LayoutDashboard class="h-7 w-7" />
                    </div>
                    <h1 class="text-4xl font-bold tracking-tight mb-3">"ProManager"</h1>
                    <p class="text-lg text-base-content/70 mb-10">"Simple project management for teams."</p>
                    <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                        <Link to="/login" class="btn btn-outline w-full sm:w-auto px-8">"Sign In"</Link>
                        <Link to="/register" class="btn btn-primary w-full sm:w-auto px-8 gap-2">
                            "Get Started" <ArrowRight class="h-4 w-4" />
                        </Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
