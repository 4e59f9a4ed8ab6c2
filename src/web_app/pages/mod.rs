// web_app/pages/mod.rs - Page components module
//
// - TableView: paginated table ("/")
// - ScrollView: infinite-scroll grid ("/scroll")

pub mod scroll;
pub mod table;

pub use scroll::ScrollView;
pub use table::TableView;

use futures::future::LocalBoxFuture;

/// Drive a store load on the UI task queue; `None` means the store is gone
fn spawn_load(load: Option<LocalBoxFuture<'static, bool>>) {
    if let Some(load) = load {
        leptos::task::spawn_local(async move {
            load.await;
        });
    }
}
