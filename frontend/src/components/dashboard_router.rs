//! `/dashboard` 按角色分派

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::admin_dashboard::AdminDashboard;
use crate::components::my_tasks::MyTasksPage;

#[component]
pub fn DashboardRouter() -> impl IntoView {
    let auth = use_auth();
    let is_admin = Memo::new(move |_| auth.is_admin());

    move || {
        if is_admin.get() {
            view! { <AdminDashboard /> }.into_any()
        } else {
            view! { <MyTasksPage /> }.into_any()
        }
    }
}
