//! Section matching over flattened descriptors.
//!
//! A [`SectionQuery`] pairs a section identifier with an explicit
//! [`MatchMode`]. Matching is order-preserving and never deduplicates: a
//! block that appears twice in the tree matches twice.
//!
//! An empty identifier matches nothing in every mode.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::descriptor::BlockDescriptor;
use crate::Result;

/// How a section identifier is compared against a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Case-sensitive equality against kind, component name, id or tag name.
    #[default]
    Exact,
    /// [`MatchMode::Exact`], plus case-sensitive substring matching on kind
    /// and component name.
    Contains,
    /// Case-insensitive substring matching on kind and component name, and
    /// case-insensitive equality on id and tag name.
    IgnoreCase,
    /// Case-insensitive regular expression searched in kind, component name,
    /// id and tag name.
    #[serde(rename = "regex")]
    Pattern,
}

impl MatchMode {
    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
            Self::IgnoreCase => "ignore-case",
            Self::Pattern => "regex",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Nothing,
    Exact(String),
    Contains(String),
    IgnoreCase(String),
    Pattern(Regex),
}

/// A compiled section search criterion.
#[derive(Debug, Clone)]
pub struct SectionQuery {
    identifier: String,
    mode: MatchMode,
    matcher: Matcher,
}

impl SectionQuery {
    /// Compile a query.
    ///
    /// Fails only in [`MatchMode::Pattern`] when the identifier is not a valid
    /// regular expression.
    pub fn new(identifier: impl Into<String>, mode: MatchMode) -> Result<Self> {
        let identifier = identifier.into();
        let matcher = if identifier.trim().is_empty() {
            Matcher::Nothing
        } else {
            match mode {
                MatchMode::Exact => Matcher::Exact(identifier.clone()),
                MatchMode::Contains => Matcher::Contains(identifier.clone()),
                MatchMode::IgnoreCase => Matcher::IgnoreCase(identifier.to_lowercase()),
                MatchMode::Pattern => Matcher::Pattern(
                    RegexBuilder::new(&identifier)
                        .case_insensitive(true)
                        .build()?,
                ),
            }
        };

        Ok(Self {
            identifier,
            mode,
            matcher,
        })
    }

    /// Exact-match query. Never fails.
    pub fn exact(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let matcher = if identifier.trim().is_empty() {
            Matcher::Nothing
        } else {
            Matcher::Exact(identifier.clone())
        };
        Self {
            identifier,
            mode: MatchMode::Exact,
            matcher,
        }
    }

    /// The identifier as given.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The comparison mode.
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether this query can match anything at all.
    pub const fn is_empty(&self) -> bool {
        matches!(self.matcher, Matcher::Nothing)
    }

    /// Test one descriptor.
    pub fn matches(&self, d: &BlockDescriptor) -> bool {
        let component = d.component_name.as_deref();
        let id = d.id.as_deref();
        let tag = d.tag_name.as_deref();

        match &self.matcher {
            Matcher::Nothing => false,
            Matcher::Exact(q) => {
                d.kind == *q || [component, id, tag].contains(&Some(q.as_str()))
            },
            Matcher::Contains(q) => {
                d.kind.contains(q.as_str())
                    || component.is_some_and(|c| c.contains(q.as_str()))
                    || [id, tag].contains(&Some(q.as_str()))
            },
            Matcher::IgnoreCase(q) => {
                d.kind.to_lowercase().contains(q.as_str())
                    || component.is_some_and(|c| c.to_lowercase().contains(q.as_str()))
                    || [id, tag]
                        .into_iter()
                        .flatten()
                        .any(|field| field.to_lowercase() == *q)
            },
            Matcher::Pattern(re) => {
                re.is_match(&d.kind)
                    || [component, id, tag]
                        .into_iter()
                        .flatten()
                        .any(|field| re.is_match(field))
            },
        }
    }
}

/// Select the matching descriptors, preserving their order.
pub fn filter<'a>(descriptors: &'a [BlockDescriptor], query: &SectionQuery) -> Vec<&'a BlockDescriptor> {
    descriptors.iter().filter(|d| query.matches(d)).collect()
}
