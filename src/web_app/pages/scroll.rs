// web_app/pages/scroll.rs - Infinite-scroll grid view (route "/scroll")
//
// Pages of 20 are appended as the user nears the end of the document. A
// "Load more" button does the same for users who do not scroll.

use leptos::prelude::*;

use crate::web_app::app::use_query_client;
use crate::web_app::components::*;
use crate::web_app::state::{FeedState, InfiniteFeed};

use super::spawn_load;

#[component]
pub fn ScrollView() -> impl IntoView {
    let client = use_query_client();
    let threshold = client.config().scroll_threshold_px;
    let feed = StoredValue::new_local(InfiniteFeed::new(client));
    let state: RwSignal<FeedState> = RwSignal::new(feed.with_value(|f| f.snapshot()));
    feed.with_value(|f| {
        f.subscribe(move |snapshot| state.set(snapshot.clone()));
    });

    let fetch_more = move || spawn_load(feed.try_with_value(|f| f.fetch_next_page()));

    Effect::new(move |_| {
        spawn_load(feed.try_with_value(|f| f.mount()));

        #[cfg(feature = "hydrate")]
        {
            let handle = window_event_listener(leptos::ev::scroll, move |_| {
                if viewport_near_bottom(threshold) {
                    fetch_more();
                }
            });
            on_cleanup(move || handle.remove());
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = threshold;
    });

    on_cleanup(move || {
        feed.try_with_value(|f| f.dispose());
    });

    let on_more = Callback::new(move |()| fetch_more());
    let on_retry = Callback::new(move |()| {
        spawn_load(feed.try_with_value(|f| f.retry()));
    });

    view! {
        <div class="container mx-auto px-4 py-8 max-w-6xl">
            <Show when=move || state.with(|s| s.is_initial_loading())>
                <Loading />
            </Show>

            {move || {
                state
                    .with(|s| s.error.as_ref().map(|e| format!("Error: {}", e)))
                    .map(|message| view! { <ErrorDisplay error=message on_retry=on_retry /> })
            }}

            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                <For
                    each=move || state.with(|s| s.products())
                    key=|product| product.id
                    children=move |product| view! { <ProductCard product=product /> }
                />
            </div>

            <div class="flex justify-center py-8">
                {move || {
                    state.with(|s| {
                        if s.is_fetching_next_page() {
                            view! { <Loading message="Loading more..." /> }.into_any()
                        } else if s.has_next_page() && s.error.is_none() && !s.pages.is_empty() {
                            view! { <ActionButton kind=ButtonKind::Secondary on_click=on_more>"Load more"</ActionButton> }
                                .into_any()
                        } else if !s.has_next_page() && !s.is_empty() {
                            let count = s.len();
                            view! {
                                <p class="text-sm text-gray-500">{format!("All {} products loaded", count)}</p>
                            }
                                .into_any()
                        } else {
                            ().into_any()
                        }
                    })
                }}
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn viewport_near_bottom(threshold: f64) -> bool {
    use crate::web_app::state::near_bottom;

    let window = window();
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0);
    let document_height = document()
        .document_element()
        .map(|element| f64::from(element.scroll_height()))
        .unwrap_or(0.0);
    near_bottom(scroll_y, viewport_height, document_height, threshold)
}
