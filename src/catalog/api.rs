use std::{
    future::Future,
    time::Duration,
};

use reqwest::{
    header::ACCEPT,
    Client,
    Url,
};
use serde::{
    Deserialize,
    Serialize,
};
use tokio::time::sleep;
use tracing::{
    debug,
    info,
    warn,
};

use crate::core::{
    BinderConfig,
    BinderError,
    CatalogError,
    CollectorNumbered,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFace {
    pub name: String,
    pub image_uris: Option<ImageUris>,
}

/// A printing as returned by `/cards/search`. Only the fields the binder uses are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub collector_number: String,
    pub rarity: String,
    pub color_identity: Vec<String>,
    pub type_line: String,
    pub image_uris: Option<ImageUris>,
    pub card_faces: Vec<CardFace>,
    pub mana_cost: Option<String>,
    pub cmc: Option<f64>,
    pub set: String,
    pub set_name: String,
    pub layout: String,
    pub frame_effects: Vec<String>,
    pub promo: bool,
    pub finishes: Vec<String>,
}

impl CollectorNumbered for RawRecord {
    fn collector_number(&self) -> &str {
        &self.collector_number
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPage {
    pub data: Vec<RawRecord>,
    pub has_more: bool,
    pub next_page: Option<String>,
    pub total_cards: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub details: Option<String>,
}

/// Top-level payload of a search response, discriminated by its `object` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SearchEnvelope {
    List(ListPage),
    Error(ErrorBody),
}

/// Retrieves one page of search results.
///
/// Implementations report a non-success HTTP status as `CatalogError::Http`
/// and leave interpretation of the envelope to `CatalogClient`.
pub trait PageTransport {
    fn get_page(&self, url: &str)
        -> impl Future<Output = Result<SearchEnvelope, CatalogError>> + Send;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &BinderConfig) -> Result<Self, BinderError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| BinderError::ClientBuild(Box::new(e)))?;
        Ok(Self { client })
    }
}

impl PageTransport for HttpTransport {
    async fn get_page(&self, url: &str) -> Result<SearchEnvelope, CatalogError> {
        let response = self.client.get(url).header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http { status: status.as_u16() });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Pages through the catalog search endpoint for one set.
pub struct CatalogClient<T> {
    transport: T,
    base_url: String,
    page_delay: Duration,
}

impl CatalogClient<HttpTransport> {
    pub fn from_config(config: &BinderConfig) -> Result<Self, BinderError> {
        Ok(Self::new(HttpTransport::new(config)?, &config.api_base_url, config.page_delay()))
    }
}

impl<T: PageTransport> CatalogClient<T> {
    pub fn new(transport: T, base_url: &str, page_delay: Duration) -> Self {
        Self { transport, base_url: base_url.trim_end_matches('/').to_string(), page_delay }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First-page URL for every printing in `set_code`, extras included, in set order.
    pub fn search_url(&self, set_code: &str) -> Result<String, CatalogError> {
        let query = format!("set:{} include:extras", set_code.to_lowercase());
        let url = Url::parse_with_params(
            &format!("{}/cards/search", self.base_url),
            &[("q", query.as_str()), ("order", "set"), ("unique", "prints")],
        )
        .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }

    /// Fetches every page for `set_code` and concatenates the records in server order.
    ///
    /// Pages are requested one at a time with `page_delay` between requests.
    /// A set with no printings yields an empty vector.
    pub async fn fetch(&self, set_code: &str) -> Result<Vec<RawRecord>, CatalogError> {
        let mut records = Vec::new();
        let mut next_url = Some(self.search_url(set_code)?);
        let mut pages = 0usize;

        while let Some(url) = next_url.take() {
            if pages > 0 {
                sleep(self.page_delay).await;
            }
            pages += 1;
            debug!(page = pages, %url, "Requesting catalog page");

            let page = match self.transport.get_page(&url).await? {
                SearchEnvelope::List(page) => page,
                SearchEnvelope::Error(body) => {
                    return Err(CatalogError::Api {
                        details: body
                            .details
                            .unwrap_or_else(|| format!("No cards found for set \"{}\"", set_code)),
                    });
                }
            };

            records.extend(page.data);
            next_url = match (page.has_more, page.next_page) {
                (true, Some(next)) => Some(next),
                (true, None) => {
                    warn!(page = pages, "Catalog reported more pages without a next_page link");
                    None
                }
                (false, _) => None,
            };
        }

        info!(set_code, pages, records = records.len(), "Fetched catalog records");
        Ok(records)
    }
}
