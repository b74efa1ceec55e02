//! 页面提示横幅
//!
//! 每个页面持有一个 `RwSignal<Option<Notice>>`，加载失败、操作失败和
//! 操作成功都通过它显示。成功提示 3 秒后自动消失，错误提示需要手动关闭。

use std::time::Duration;

use leptos::prelude::*;

use crate::components::icons::{AlertCircle, CheckCircle, X};
use crate::error::ApiError;
use crate::logging::{log_error, log_warn};

const SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// 记录失败的调用并显示面向用户的消息
pub fn report_error(notice: RwSignal<Option<Notice>>, page: &str, err: &ApiError, fallback: &str) {
    log_error!("[{}] {}: {}", page, fallback, err);
    if matches!(err.status(), Some(401 | 403)) {
        log_warn!("[{}] request was rejected, the stored session may be stale", page);
    }
    notice.set(Some(Notice::error(err.user_message(fallback))));
}

#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    // 成功提示自动清除；期间被替换则保留新提示
    Effect::new(move |_| {
        if let Some(current) = notice.get().filter(|n| n.kind == NoticeKind::Success) {
            set_timeout(
                move || {
                    // 页面可能已卸载
                    if notice.try_get_untracked().flatten().as_ref() == Some(&current) {
                        notice.set(None);
                    }
                },
                SUCCESS_TIMEOUT,
            );
        }
    });

    move || {
        notice.get().map(|n| {
            let (class, icon) = match n.kind {
                NoticeKind::Success => (
                    "alert alert-success",
                    view! { <CheckCircle class="h-5 w-5 shrink-0" /> }.into_any(),
                ),
                NoticeKind::Error => (
                    "alert alert-error",
                    view! { <AlertCircle class="h-5 w-5 shrink-0" /> }.into_any(),
                ),
            };
            view! {
                <div role="alert" class=format!("{} text-sm py-2", class)>
                    {icon}
                    <span class="break-words">{n.message}</span>
                    <button
                        type="button"
                        class="btn btn-ghost btn-xs btn-circle"
                        aria-label="Dismiss"
                        on:click=move |_| notice.set(None)
                    >
                        <X class="h-4 w-4" />
                    </button>
                </div>
            }
        })
    }
}
