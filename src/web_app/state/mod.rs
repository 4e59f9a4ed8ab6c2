// web_app/state/mod.rs - View state stores
//
// Plain Rust state machines behind the two views. The Leptos pages own one
// store each and mirror its snapshots into signals.

pub mod feed;
pub mod observable;
pub mod table;

pub use feed::{near_bottom, next_page_after, FeedState, FeedStatus, InfiniteFeed};
pub use observable::{Observers, SubscriptionId};
pub use table::{LoadStatus, LoadTicket, TableState, TableStore};
