// web_app/components/pagination.rs - Pagination bar for the table view
//
// Renders a PaginationModel. Previous and Next are always present and only
// ever disabled, so the layout does not jump when there is nothing to page.

use leptos::prelude::*;

use crate::web_app::pagination::{PageItem, PaginationModel};

const NAV_CLASS: &str = "px-3 py-1 rounded bg-indigo-600 text-white disabled:opacity-50 disabled:cursor-not-allowed";
const CURRENT_CLASS: &str = "px-3 py-1 rounded bg-indigo-600 text-white";
const PAGE_CLASS: &str = "px-3 py-1 rounded bg-gray-200 text-gray-700 hover:bg-gray-300";

#[component]
pub fn Pagination(
    model: Signal<PaginationModel>,
    /// Called with the page number the user asked for
    on_page: Callback<u32>,
) -> impl IntoView {
    let go_previous = move |_| {
        let m = model.get_untracked();
        if m.can_previous {
            on_page.run(m.current - 1);
        }
    };

    let go_next = move |_| {
        let m = model.get_untracked();
        if m.can_next {
            on_page.run(m.current + 1);
        }
    };

    view! {
        <div class="mt-6 flex items-center justify-between">
            <div class="flex items-center gap-1">
                <button
                    type="button"
                    class=NAV_CLASS
                    disabled=move || !model.get().can_previous
                    on:click=go_previous
                >
                    "Previous"
                </button>

                {move || {
                    model
                        .get()
                        .items
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page { number, current } => {
                                view! {
                                    <button
                                        type="button"
                                        class={if current { CURRENT_CLASS } else { PAGE_CLASS }}
                                        aria-current=current.then_some("page")
                                        on:click=move |_| on_page.run(number)
                                    >
                                        {number}
                                    </button>
                                }
                                    .into_any()
                            }
                            PageItem::LeftEllipsis | PageItem::RightEllipsis => {
                                view! { <span class="px-2">"…"</span> }.into_any()
                            }
                        })
                        .collect_view()
                }}

                <button
                    type="button"
                    class=NAV_CLASS
                    disabled=move || !model.get().can_next
                    on:click=go_next
                >
                    "Next"
                </button>
            </div>

            <span class="text-sm text-gray-600">{move || model.get().summary()}</span>
        </div>
    }
}
