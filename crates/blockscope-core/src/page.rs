//! Content entries returned by the content API.
//!
//! Pages are deserialized leniently: a wrong-typed scalar becomes `None` and a
//! missing or non-array `blocks` field becomes an empty tree, so one odd entry
//! never fails a whole listing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::block::{BlockNode, blocks_from_value};
use crate::descriptor::BlockDescriptor;
use crate::flatten::Flattener;

/// Display name for pages without a `name`.
pub const UNNAMED_PAGE: &str = "Unnamed";

/// Envelope of a content-API listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentResponse {
    /// Matching entries.
    #[serde(default, deserialize_with = "lenient_pages")]
    pub results: Vec<Page>,
}

/// The `data` payload of a page entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Canonical page URL path.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    /// Alternate URL path field.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_path: Option<String>,
    /// Root block sequence.
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub blocks: Vec<BlockNode>,
}

/// A targeting rule attached to a page; the first rule's value is often its URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryEntry {
    /// Targeted property, e.g. `"urlPath"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub property: Option<String>,
    /// Rule value; only string values are used.
    #[serde(default)]
    pub value: Value,
}

/// A page entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    /// Entry id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Entry name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Publication state, e.g. `"published"` or `"draft"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub published: Option<String>,
    /// Page payload.
    #[serde(default, deserialize_with = "lenient_data")]
    pub data: PageData,
    /// Targeting rules.
    #[serde(default, deserialize_with = "lenient_query")]
    pub query: Vec<QueryEntry>,
}

impl Page {
    /// The page URL: `data.url`, then the first targeting value, then `data.urlPath`.
    pub fn url(&self) -> Option<&str> {
        self.data
            .url
            .as_deref()
            .or_else(|| self.query.first().and_then(|q| q.value.as_str()))
            .or(self.data.url_path.as_deref())
    }

    /// The page name, or [`UNNAMED_PAGE`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PAGE)
    }

    /// Report header for this page.
    pub fn page_ref(&self) -> PageRef {
        PageRef {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            url: self.url().map(str::to_string),
            published: self.published.clone(),
        }
    }

    /// Flatten this page's blocks.
    pub fn descriptors(&self, flattener: &Flattener) -> Vec<BlockDescriptor> {
        flattener.flatten(&self.data.blocks).descriptors
    }
}

/// Identifying header of a page in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    /// Entry id.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Page URL, when known.
    pub url: Option<String>,
    /// Publication state.
    pub published: Option<String>,
}

/// One way of locating a page from a user-supplied identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Match `data.url`.
    Url,
    /// Match the entry id.
    Id,
    /// Match the entry name.
    Name,
    /// Match any targeting rule value.
    QueryValue,
}

impl LookupStrategy {
    /// Strategies to try for an identifier, in order.
    ///
    /// URL lookup only applies to identifiers starting with `/`, id lookup only
    /// to identifiers containing `_`.
    pub fn plan(identifier: &str) -> Vec<Self> {
        let mut plan = Vec::with_capacity(4);
        if identifier.starts_with('/') {
            plan.push(Self::Url);
        }
        if identifier.contains('_') {
            plan.push(Self::Id);
        }
        plan.push(Self::Name);
        plan.push(Self::QueryValue);
        plan
    }

    /// The content-API query document for this strategy.
    pub fn query(self, identifier: &str) -> Value {
        match self {
            Self::Url => json!({ "data.url": identifier }),
            Self::Id => json!({ "id": identifier }),
            Self::Name => json!({ "name": identifier }),
            Self::QueryValue => json!({ "query.value": identifier }),
        }
    }

    /// Evaluate this strategy locally against a page.
    pub fn matches(self, page: &Page, identifier: &str) -> bool {
        match self {
            Self::Url => page.data.url.as_deref() == Some(identifier),
            Self::Id => page.id.as_deref() == Some(identifier),
            Self::Name => page.name.as_deref() == Some(identifier),
            Self::QueryValue => page
                .query
                .iter()
                .any(|q| q.value.as_str() == Some(identifier)),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_blocks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<BlockNode>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(blocks_from_value(&value))
}

fn lenient_data<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PageData, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_query<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<QueryEntry>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|rules| {
            rules
                .iter()
                .map(|rule| serde_json::from_value(rule.clone()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default())
}

fn lenient_pages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Page>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| serde_json::from_value(entry.clone()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default())
}
