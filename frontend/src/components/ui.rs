//! 基础 UI 组件：按钮、输入框、卡片
//!
//! 仅负责样式，不包含业务逻辑。

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-outline",
            ButtonVariant::Danger => "btn btn-error btn-outline",
            ButtonVariant::Ghost => "btn btn-ghost btn-sm",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    /// `button` / `submit`
    #[prop(default = "button")]
    button_type: &'static str,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
    #[prop(optional, into)] class: String,
    #[prop(optional)] on_click: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = format!("{} gap-2 {}", variant.class(), class);
    view! {
        <button
            type=button_type
            class=class
            disabled=move || disabled.get()
            on:click=move |ev| {
                if let Some(cb) = on_click {
                    cb.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}

/// 带标签的受控输入框
#[component]
pub fn Input(
    #[prop(optional)] label: Option<&'static str>,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] id: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control w-full">
            {label.map(|text| view! {
                <label class="label" for=id>
                    <span class="label-text">{text}</span>
                </label>
            })}
            <input
                id=id
                type=input_type
                placeholder=placeholder
                class="input input-bordered w-full"
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn Card(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    view! {
        <div class=format!("card bg-base-100 shadow-xl {}", class)>
            <div class="card-body">{children()}</div>
        </div>
    }
}
