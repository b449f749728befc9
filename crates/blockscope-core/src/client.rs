use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value, json};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::matcher::{MatchMode, SectionQuery};
use crate::page::{ContentResponse, LookupStrategy, Page};
use crate::source::PageSource;
use crate::{Error, Result};

/// HTTP client for the content API.
///
/// The full page listing is fetched once per client and cached.
pub struct ContentClient {
    client: Client,
    endpoint: Url,
    public_key: String,
    private_key: Option<String>,
    page_limit: usize,
    max_pages: usize,
    all_pages: OnceCell<Vec<Page>>,
}

impl ContentClient {
    /// Creates a client from validated API settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("blockscope/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            endpoint: endpoint_url(&config.base_url, &config.model)?,
            public_key: config.public_key.clone().unwrap_or_default(),
            private_key: config.private_key.clone().filter(|k| !k.is_empty()),
            page_limit: config.page_limit,
            max_pages: config.max_pages,
            all_pages: OnceCell::new(),
        })
    }

    /// The model endpoint, without credentials.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches one listing page, optionally filtered by a query document
    pub async fn query_pages(
        &self,
        query: Option<&Value>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Page>> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", &self.public_key);
            if let Some(query) = query {
                pairs.append_pair("query", &query.to_string());
            }
            pairs.append_pair("limit", &limit.to_string());
            if offset > 0 {
                pairs.append_pair("offset", &offset.to_string());
            }
        }

        match query {
            Some(q) => debug!("GET {} query={} limit={} offset={}", self.endpoint, q, limit, offset),
            None => debug!("GET {} limit={} offset={}", self.endpoint, limit, offset),
        }

        let mut request = self.client.get(url);
        if let Some(key) = &self.private_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();

        if !status.is_success() {
            // Map 404 to a clearer NotFound error
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!(
                    "Content model not found at '{}'. Check api.base_url and api.model",
                    self.endpoint
                )));
            }

            return Err(response.error_for_status().err().map_or_else(
                || Error::Other(format!("Unexpected status {status} from content API")),
                Error::Network,
            ));
        }

        let body = response.text().await?;
        let parsed: ContentResponse = serde_json::from_str(&body)?;
        debug!("Received {} entries", parsed.results.len());
        Ok(parsed.results)
    }

    /// Fetches the first entry matching a query document
    pub async fn query_page(&self, query: &Value) -> Result<Option<Page>> {
        Ok(self.query_pages(Some(query), 1, 0).await?.into_iter().next())
    }

    /// Fetches every entry matching `query`, following `offset` pages up to
    /// `max_pages`.
    pub async fn query_all_pages(&self, query: Option<&Value>) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        while pages.len() < self.max_pages {
            let limit = self.page_limit.min(self.max_pages - pages.len());
            let batch = self.query_pages(query, limit, pages.len()).await?;
            let received = batch.len();
            pages.extend(batch);

            if received < limit {
                break;
            }
        }
        pages.truncate(self.max_pages);
        Ok(pages)
    }

    async fn fetch_all_pages(&self) -> Result<Vec<Page>> {
        let pages = self.query_all_pages(None).await?;
        info!("Fetched {} pages from {}", pages.len(), self.endpoint);
        Ok(pages)
    }
}

#[async_trait]
impl PageSource for ContentClient {
    async fn find_page(&self, identifier: &str) -> Result<Option<Page>> {
        for strategy in LookupStrategy::plan(identifier) {
            debug!("Looking up '{}' via {:?}", identifier, strategy);
            if let Some(page) = self.query_page(&strategy.query(identifier)).await? {
                info!("Found page '{}' via {:?}", page.display_name(), strategy);
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    async fn all_pages(&self) -> Result<Vec<Page>> {
        self.all_pages
            .get_or_try_init(|| self.fetch_all_pages())
            .await
            .cloned()
    }

    async fn pages_with_section_hint(&self, query: &SectionQuery) -> Result<Vec<Page>> {
        let documents = section_queries(query);
        let responses = join_all(
            documents
                .iter()
                .map(|document| self.query_all_pages(Some(document))),
        )
        .await;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for (index, response) in responses.into_iter().enumerate() {
            match response {
                Ok(pages) => {
                    debug!("Section strategy {} returned {} pages", index + 1, pages.len());
                    for page in pages {
                        let fresh = page.id.as_ref().is_none_or(|id| seen.insert(id.clone()));
                        if fresh {
                            candidates.push(page);
                        }
                    }
                },
                Err(e) => warn!("Section strategy {} failed: {}", index + 1, e),
            }
        }

        info!(
            "{} candidate pages for '{}' ({})",
            candidates.len(),
            query.identifier(),
            query.mode()
        );
        Ok(candidates)
    }
}

/// Block fields the server-side hints search, in strategy order.
///
/// Only top-level blocks and their direct children are reachable; deeper
/// blocks and id or tag-name matches need a client-side scan.
pub const SECTION_QUERY_FIELDS: [&str; 4] = [
    "data.blocks.@type",
    "data.blocks.component.name",
    "data.blocks.children.@type",
    "data.blocks.children.component.name",
];

/// Server-side query documents that narrow pages to those likely holding a
/// section matching `query`, one per [`SECTION_QUERY_FIELDS`] entry.
///
/// Each mode maps to the same comparison the client-side match makes:
/// equality for exact, an escaped `$regex` for contains (case-insensitive
/// with `$options: "i"` for ignore-case) and the raw pattern with
/// `$options: "i"` for regex.
pub fn section_queries(query: &SectionQuery) -> Vec<Value> {
    let identifier = query.identifier();
    let condition = match query.mode() {
        MatchMode::Exact => json!(identifier),
        MatchMode::Contains => json!({ "$regex": regex::escape(identifier) }),
        MatchMode::IgnoreCase => {
            json!({ "$regex": regex::escape(identifier), "$options": "i" })
        },
        MatchMode::Pattern => json!({ "$regex": identifier, "$options": "i" }),
    };

    SECTION_QUERY_FIELDS
        .iter()
        .map(|field| {
            let mut document = Map::new();
            document.insert((*field).to_string(), condition.clone());
            Value::Object(document)
        })
        .collect()
}

fn map_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(format!("Content API request timed out: {err}"))
    } else {
        Error::Network(err)
    }
}

fn endpoint_url(base_url: &str, model: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), model))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "unsupported scheme '{}' in api.base_url",
            url.scheme()
        )));
    }
    Ok(url)
}
