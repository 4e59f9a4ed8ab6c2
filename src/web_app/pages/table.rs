// web_app/pages/table.rs - Paginated table view (route "/")
//
// One page of products per (page, search) key with sortable columns and a
// numbered page window. The TableStore does the work; this component mirrors
// its snapshots into a signal and turns clicks into store calls.

use leptos::prelude::*;

use crate::web_app::app::use_query_client;
use crate::web_app::columns::Column;
use crate::web_app::components::*;
use crate::web_app::state::{TableState, TableStore};

use super::spawn_load;

pub const TABLE_ERROR_MESSAGE: &str = "Failed to load products. Please try again.";

#[component]
pub fn TableView() -> impl IntoView {
    let store = StoredValue::new_local(TableStore::new(use_query_client()));
    let state: RwSignal<TableState> = RwSignal::new(store.with_value(|s| s.snapshot()));
    store.with_value(|s| {
        s.subscribe(move |snapshot| state.set(snapshot.clone()));
    });

    let load = move || spawn_load(store.try_with_value(|s| s.load()));

    // First load once mounted in the browser
    Effect::new(move |_| load());

    on_cleanup(move || {
        store.try_with_value(|s| s.dispose());
    });

    let on_page = Callback::new(move |page: u32| {
        if store.try_with_value(|s| s.set_page(page)).unwrap_or(false) {
            load();
        }
    });

    let on_search = Callback::new(move |search: String| {
        if store.try_with_value(|s| s.set_search(&search)).unwrap_or(false) {
            load();
        }
    });

    let on_sort = Callback::new(move |column: Column| {
        store.try_with_value(|s| s.toggle_sort(column));
    });

    let on_retry = Callback::new(move |()| {
        spawn_load(store.try_with_value(|s| s.retry()));
    });

    let rows = Signal::derive(move || state.with(|s| s.rows()));
    let sort = Signal::derive(move || state.with(|s| s.sort));
    let pagination = Signal::derive(move || state.with(|s| s.pagination()));
    let initial_search = state.with_untracked(|s| s.key.search.clone());

    view! {
        <div class="container mx-auto p-4 max-w-7xl">
            <SearchBox initial=initial_search on_search=on_search />

            {move || {
                let (loading, failed) = state.with(|s| (s.is_loading(), s.is_error()));
                if loading {
                    view! { <Loading /> }.into_any()
                } else if failed {
                    view! {
                        <ErrorDisplay error=TABLE_ERROR_MESSAGE.to_string() on_retry=on_retry />
                    }
                        .into_any()
                } else {
                    view! {
                        <ProductTable rows=rows sort=sort on_sort=on_sort />
                        <Pagination model=pagination on_page=on_page />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
