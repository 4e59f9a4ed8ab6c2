// web_app/model/mod.rs - Shared data models for client and server
//
// These structs mirror the JSON contract of GET /api/products and the
// query keys that the cache layer uses to scope page responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product as returned by the listing endpoint (read-only to the client)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "text_or_number")]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Product {
    /// Price formatted for display, e.g. `$19.99`
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// One page of the listing endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub data: Vec<Product>,
    /// Total number of products matching the query, independent of page size
    pub total: u64,
    /// 1-based page number this response corresponds to
    pub page: u32,
    /// Page size echoed by the backend, when it sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageResponse {
    /// Check the `data.len() <= limit` invariant for the limit that was requested
    pub fn check(&self, limit: u32) -> Result<(), String> {
        if self.data.len() > limit as usize {
            return Err(format!(
                "page {} carries {} products but limit was {}",
                self.page,
                self.data.len(),
                limit
            ));
        }
        Ok(())
    }
}

/// Query key for the table view: each (page, search) pair is cached on its own
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub page: u32,
    pub search: String,
}

impl TableKey {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }
}

impl Default for TableKey {
    fn default() -> Self {
        Self::new(1, "")
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "products[page={}, search={:?}]", self.page, self.search)
    }
}

/// Query key for the infinite list: a single logical key holding every page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FeedKey;

impl std::fmt::Display for FeedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "products-infinite")
    }
}

/// Request key for one page of the infinite list.
///
/// Only used to share a page request that is already in flight; the pages
/// themselves are kept under [`FeedKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeedPageKey {
    pub page: u32,
}

impl std::fmt::Display for FeedPageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "products-infinite[page={}]", self.page)
    }
}

/// Accept the category as text or as a numeric category id.
///
/// The reference backend sends the category foreign key instead of its name.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Int(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
    })
}
