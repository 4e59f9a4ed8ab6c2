// web_app/api/client.rs - Paged fetch contract
//
// fetch_page(page, limit, search) -> PageResponse over GET /api/products.
//
// Philosophy:
// - The transport is a trait (ProductSource) so the cache and the views can
//   be exercised against in-memory fixtures
// - No retries here; the cache layers its retry policy on top (with_retry)
// - Futures are local (!Send): the UI runs on a single-threaded event loop

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use url::form_urlencoded;

use crate::web_app::config::PRODUCTS_PATH;
use crate::web_app::model::PageResponse;

use super::error::FetchError;

/// Parameters of one listing request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl PageRequest {
    /// Validate the paging arguments; an empty search means "no filter"
    pub fn new(page: u32, limit: u32, search: Option<&str>) -> Result<Self, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidRequest("page numbers start at 1".to_string()));
        }
        if limit == 0 {
            return Err(FetchError::InvalidRequest("limit must be positive".to_string()));
        }
        Ok(Self {
            page,
            limit,
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    /// Query string: `page` and `limit` always, `search` only when non-empty
    pub fn query_string(&self) -> String {
        let mut query = format!("page={}&limit={}", self.page, self.limit);
        if let Some(search) = &self.search {
            query.push_str("&search=");
            query.push_str(&encode_component(search));
        }
        query
    }

    /// Full request URL below `api_base` (which may be empty for same origin)
    pub fn url(&self, api_base: &str) -> String {
        format!(
            "{}{}?{}",
            api_base.trim_end_matches('/'),
            PRODUCTS_PATH,
            self.query_string()
        )
    }
}

/// Percent-encode one query value the way browsers' `encodeURIComponent`
/// does: a space becomes `%20`, and `! ' ( ) ~` stay as they are.
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20",
            "%21" => "!",
            "%27" => "'",
            "%28" => "(",
            "%29" => ")",
            "%7E" => "~",
            other => other,
        })
        .collect()
}

/// Anything that can answer a page request
pub trait ProductSource {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>>;
}

/// Decode a response body, checking the page-size invariant on the way
pub fn decode_page(body: &str, request: &PageRequest) -> Result<PageResponse, FetchError> {
    let page: PageResponse = serde_json::from_str(body)?;
    if let Err(violation) = page.check(request.limit) {
        tracing::warn!("Listing endpoint broke the page size invariant: {}", violation);
    }
    Ok(page)
}

/// Run `attempt` once, then up to `retries` more times while it keeps failing
pub async fn with_retry<F, Fut, T>(retries: u32, mut attempt: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, FetchError>>,
{
    let mut tries = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if tries < retries => {
                tries += 1;
                tracing::warn!("Request failed ({}), retry {} of {}", e, tries, retries);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Listing endpoint reached over HTTP with the browser fetch API
#[derive(Clone, Debug)]
pub struct HttpProductSource {
    api_base: String,
}

impl HttpProductSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl ProductSource for HttpProductSource {
    fn fetch_page(&self, request: &PageRequest) -> LocalBoxFuture<'static, Result<PageResponse, FetchError>> {
        let url = request.url(&self.api_base);
        let request = request.clone();
        async move {
            tracing::info!("GET {}", url);
            let body = get_text(&url).await?;
            decode_page(&body, &request)
        }
        .boxed_local()
    }
}

#[cfg(feature = "hydrate")]
async fn get_text(url: &str) -> Result<String, FetchError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    fn network(err: JsValue) -> FetchError {
        FetchError::Network(format!("{:?}", err))
    }

    let window = web_sys::window().ok_or_else(|| FetchError::Network("no browser window".to_string()))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    if !response.ok() {
        return Err(FetchError::Status {
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    text.as_string()
        .ok_or_else(|| FetchError::Decode("response body is not text".to_string()))
}

#[cfg(not(feature = "hydrate"))]
async fn get_text(url: &str) -> Result<String, FetchError> {
    Err(FetchError::Network(format!(
        "HTTP transport is only available in the browser (requested {})",
        url
    )))
}
