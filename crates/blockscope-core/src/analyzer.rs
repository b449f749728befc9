//! The two business questions plus the cross-page inventory.
//!
//! [`SectionAnalyzer`] answers them over any [`PageSource`]: "what sections
//! exist on page X" ([`SectionAnalyzer::sections_on_page`]) and "which pages
//! contain section Y" ([`SectionAnalyzer::pages_with_section`]).

use serde::Serialize;
use tracing::{debug, info};

use crate::descriptor::{BlockDescriptor, BlockPath};
use crate::flatten::Flattener;
use crate::matcher::{MatchMode, SectionQuery, filter};
use crate::page::{Page, PageRef};
use crate::source::PageSource;
use crate::summary::{Inventory, PageSummary};
use crate::{Error, Result};

/// How candidate pages are gathered for a section search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Scan every page.
    #[default]
    ClientSide,
    /// Narrow candidates with server-side queries, then confirm locally.
    ServerAssisted,
}

/// Every section on one page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsReport {
    /// The page analyzed.
    pub page: PageRef,
    /// Flattened sections in pre-order.
    pub sections: Vec<BlockDescriptor>,
    /// Statistics over `sections`.
    pub summary: PageSummary,
    /// Subtrees cut off by the depth bound.
    #[serde(skip_serializing_if = "is_zero")]
    pub truncated: usize,
}

/// A matched section, reduced to what locates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSection {
    /// Resolved kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Block id.
    pub id: Option<String>,
    /// Nesting depth.
    pub depth: usize,
    /// Position in the page's block tree.
    pub path: BlockPath,
}

impl From<&BlockDescriptor> for MatchedSection {
    fn from(d: &BlockDescriptor) -> Self {
        Self {
            kind: d.kind.clone(),
            id: d.id.clone(),
            depth: d.depth,
            path: d.path.clone(),
        }
    }
}

/// One page containing the searched section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMatch {
    /// The matching page.
    pub page: PageRef,
    /// Number of matching sections on the page.
    pub match_count: usize,
    /// The matching sections, in pre-order.
    pub matching_sections: Vec<MatchedSection>,
}

/// Pages containing a section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMatchReport {
    /// The searched identifier.
    pub search_criteria: String,
    /// Comparison mode used.
    pub mode: MatchMode,
    /// Number of pages with at least one match.
    pub total_pages_found: usize,
    /// Number of pages examined.
    pub total_pages_analyzed: usize,
    /// Matching pages, in source order.
    pub pages: Vec<PageMatch>,
}

/// Answers section questions over a [`PageSource`].
pub struct SectionAnalyzer<S> {
    source: S,
    flattener: Flattener,
}

impl<S: PageSource> SectionAnalyzer<S> {
    /// Analyzer with the default depth bound.
    pub fn new(source: S) -> Self {
        Self {
            source,
            flattener: Flattener::new(),
        }
    }

    /// Replace the flattener, e.g. to change the depth bound.
    #[must_use]
    pub const fn with_flattener(mut self, flattener: Flattener) -> Self {
        self.flattener = flattener;
        self
    }

    /// Flatten and summarize the page named by `identifier`.
    pub async fn sections_on_page(&self, identifier: &str) -> Result<SectionsReport> {
        let page = self
            .source
            .find_page(identifier)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Page not found: '{identifier}'")))?;

        let flattened = self.flattener.flatten(&page.data.blocks);
        let summary = PageSummary::from_descriptors(&flattened.descriptors);
        info!(
            "Page '{}' has {} sections of {} types",
            page.display_name(),
            summary.total_sections,
            summary.unique_types
        );

        Ok(SectionsReport {
            page: page.page_ref(),
            sections: flattened.descriptors,
            summary,
            truncated: flattened.truncated,
        })
    }

    /// Find pages containing sections that satisfy `query`.
    pub async fn pages_with_section(
        &self,
        query: &SectionQuery,
        strategy: Strategy,
    ) -> Result<PageMatchReport> {
        let candidates = if query.is_empty() {
            Vec::new()
        } else {
            match strategy {
                Strategy::ClientSide => self.source.all_pages().await?,
                Strategy::ServerAssisted => self.source.pages_with_section_hint(query).await?,
            }
        };
        debug!(
            "Confirming '{}' ({}) on {} pages",
            query.identifier(),
            query.mode(),
            candidates.len()
        );

        let pages: Vec<PageMatch> = candidates
            .iter()
            .filter_map(|page| self.match_page(page, query))
            .collect();

        info!(
            "'{}' found on {} of {} pages",
            query.identifier(),
            pages.len(),
            candidates.len()
        );

        Ok(PageMatchReport {
            search_criteria: query.identifier().to_string(),
            mode: query.mode(),
            total_pages_found: pages.len(),
            total_pages_analyzed: candidates.len(),
            pages,
        })
    }

    /// Tally section kinds across every page.
    pub async fn inventory(&self) -> Result<Inventory> {
        let pages = self.source.all_pages().await?;
        let mut builder = Inventory::builder();
        for page in &pages {
            builder.add_page(page.display_name(), page.url(), &page.descriptors(&self.flattener));
        }
        Ok(builder.build())
    }

    /// Headers of every page.
    pub async fn available_pages(&self) -> Result<Vec<PageRef>> {
        Ok(self
            .source
            .all_pages()
            .await?
            .iter()
            .map(Page::page_ref)
            .collect())
    }

    fn match_page(&self, page: &Page, query: &SectionQuery) -> Option<PageMatch> {
        let descriptors = page.descriptors(&self.flattener);
        let matching_sections: Vec<MatchedSection> = filter(&descriptors, query)
            .into_iter()
            .map(MatchedSection::from)
            .collect();

        if matching_sections.is_empty() {
            return None;
        }
        Some(PageMatch {
            page: page.page_ref(),
            match_count: matching_sections.len(),
            matching_sections,
        })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &usize) -> bool {
    *n == 0
}
