//! Where pages come from.
//!
//! [`PageSource`] is the seam between analysis and retrieval. The live
//! [`ContentClient`](crate::ContentClient) implements it against the content
//! API; [`StaticPages`] serves a saved response for offline analysis.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::matcher::SectionQuery;
use crate::page::{ContentResponse, LookupStrategy, Page};
use crate::{Error, Result};

/// A provider of page entries.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Locate one page by URL path, id, name or targeting value.
    async fn find_page(&self, identifier: &str) -> Result<Option<Page>>;

    /// Every page the source can see.
    async fn all_pages(&self) -> Result<Vec<Page>>;

    /// Pages likely to contain a section matching `query`, before
    /// client-side confirmation.
    ///
    /// Sources without server-side search return every page.
    async fn pages_with_section_hint(&self, query: &SectionQuery) -> Result<Vec<Page>> {
        debug!("No server-side search for '{}', scanning all pages", query.identifier());
        self.all_pages().await
    }
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Box<T> {
    async fn find_page(&self, identifier: &str) -> Result<Option<Page>> {
        (**self).find_page(identifier).await
    }

    async fn all_pages(&self) -> Result<Vec<Page>> {
        (**self).all_pages().await
    }

    async fn pages_with_section_hint(&self, query: &SectionQuery) -> Result<Vec<Page>> {
        (**self).pages_with_section_hint(query).await
    }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Vec<Page>,
}

impl StaticPages {
    /// Wrap already-loaded pages.
    pub const fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Load a saved content-API response.
    ///
    /// Accepts the listing envelope (`{"results": [...]}`), a bare array of
    /// entries, or a single entry.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a saved content-API response; see [`StaticPages::from_file`].
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let pages = match value {
            Value::Array(_) => serde_json::from_value::<ContentResponse>(
                serde_json::json!({ "results": value }),
            )?
            .results,
            Value::Object(ref object) if object.contains_key("results") => {
                serde_json::from_value::<ContentResponse>(value)?.results
            },
            Value::Object(_) => vec![serde_json::from_value::<Page>(value)?],
            _ => {
                return Err(Error::Serialization(
                    "expected a content listing, an array of entries or a single entry".into(),
                ));
            },
        };
        Ok(Self { pages })
    }

    /// The held pages.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn find_page(&self, identifier: &str) -> Result<Option<Page>> {
        for strategy in LookupStrategy::plan(identifier) {
            if let Some(page) = self.pages.iter().find(|p| strategy.matches(p, identifier)) {
                debug!("Found '{}' locally via {:?}", identifier, strategy);
                return Ok(Some(page.clone()));
            }
        }
        Ok(None)
    }

    async fn all_pages(&self) -> Result<Vec<Page>> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LISTING: &str = r#"{
        "results": [
            { "id": "p_1", "name": "Home", "data": { "url": "/" } },
            { "id": "p_2", "name": "Pricing", "data": { "url": "/pricing" },
              "query": [{ "property": "urlPath", "value": "/plans" }] }
        ]
    }"#;

    #[tokio::test]
    async fn test_find_page_strategies() {
        let source = StaticPages::from_json(LISTING).unwrap();

        let by_url = source.find_page("/pricing").await.unwrap().unwrap();
        assert_eq!(by_url.name.as_deref(), Some("Pricing"));

        let by_id = source.find_page("p_1").await.unwrap().unwrap();
        assert_eq!(by_id.name.as_deref(), Some("Home"));

        let by_name = source.find_page("Pricing").await.unwrap().unwrap();
        assert_eq!(by_name.id.as_deref(), Some("p_2"));

        let by_query = source.find_page("/plans").await.unwrap().unwrap();
        assert_eq!(by_query.id.as_deref(), Some("p_2"));

        assert!(source.find_page("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_candidates_default_to_all_pages() {
        let source = StaticPages::from_json(LISTING).unwrap();
        let hinted = source
            .pages_with_section_hint(&SectionQuery::exact("Hero"))
            .await
            .unwrap();
        assert_eq!(hinted.len(), 2);
    }

    #[test]
    fn test_accepts_array_and_single_entry() {
        let array = StaticPages::from_json(r#"[{ "name": "A" }, { "name": "B" }]"#).unwrap();
        assert_eq!(array.pages().len(), 2);

        let single = StaticPages::from_json(r#"{ "name": "Solo", "data": { "blocks": [] } }"#).unwrap();
        assert_eq!(single.pages()[0].display_name(), "Solo");

        assert!(StaticPages::from_json("42").is_err());
        assert!(StaticPages::from_json("{ nope").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pages.json");
        std::fs::write(&path, LISTING).unwrap();
        assert_eq!(StaticPages::from_file(&path).unwrap().pages().len(), 2);

        let err = StaticPages::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.category(), "io");
    }
}
