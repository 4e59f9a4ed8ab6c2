// web_app/components/common.rs - Reusable UI components
//
// Small, stateless building blocks shared by both listing views. All data
// comes in through props.

use leptos::prelude::*;

/// Spinner with a status line underneath
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-8" role="status">
            <div class="inline-block animate-spin rounded-full h-8 w-8 border-4 border-indigo-500 border-t-transparent"></div>
            <p class="mt-3 text-sm text-gray-500">{message}</p>
        </div>
    }
}

/// Error message with an optional retry action
#[component]
pub fn ErrorDisplay(
    error: String,
    /// Shown as a "Retry" button when present
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="text-center py-8 text-red-600" role="alert">
            <p>{error}</p>
            {on_retry.map(|retry| view! {
                <div class="mt-4">
                    <ActionButton kind=ButtonKind::Secondary on_click=retry>"Retry"</ActionButton>
                </div>
            })}
        </div>
    }
}

/// Visual weight of an [`ActionButton`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonKind {
    #[default]
    Primary,
    Secondary,
}

impl ButtonKind {
    pub fn class(self) -> &'static str {
        match self {
            ButtonKind::Primary => {
                "px-4 py-2 rounded-lg font-medium shadow-sm bg-indigo-600 text-white \
                 hover:bg-indigo-700 disabled:opacity-50 disabled:cursor-not-allowed"
            }
            ButtonKind::Secondary => {
                "px-4 py-2 rounded-lg font-medium shadow-sm bg-white text-gray-700 \
                 border border-gray-300 hover:bg-gray-50 disabled:opacity-50"
            }
        }
    }
}

#[component]
pub fn ActionButton(
    children: Children,
    #[prop(optional)]
    kind: ButtonKind,
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    #[prop(into, optional)]
    disabled: Signal<bool>,
    /// "button" or "submit"
    #[prop(default = "button")]
    button_type: &'static str,
) -> impl IntoView {
    view! {
        <button
            type=button_type
            class=kind.class()
            disabled=move || disabled.get()
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Search box that submits on Enter or on the button
#[component]
pub fn SearchBox(
    /// Text currently applied to the listing
    initial: String,
    on_search: Callback<String>,
    #[prop(default = "Search products...")]
    placeholder: &'static str,
) -> impl IntoView {
    let text = RwSignal::new(initial);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_search.run(text.get_untracked().trim().to_string());
    };

    view! {
        <form on:submit=on_submit class="flex gap-3 mb-6">
            <input
                type="search"
                placeholder=placeholder
                class="flex-1 px-4 py-2 border border-gray-300 rounded-lg \
                       focus:ring-2 focus:ring-indigo-500 outline-none shadow-sm"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            />
            <ActionButton button_type="submit">"Search"</ActionButton>
        </form>
    }
}
