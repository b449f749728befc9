//! # blockscope-core
//!
//! Core functionality for blockscope - section discovery for headless-CMS page
//! content.
//!
//! Content APIs hand back each page as a tree of loosely typed JSON blocks.
//! This crate turns those trees into flat, positioned section descriptors and
//! answers two questions over them: what sections exist on a page, and which
//! pages contain a given section.
//!
//! ## Architecture
//!
//! - **Block model**: lenient parsing of raw JSON blocks into [`BlockNode`] trees
//! - **Flattening**: pre-order traversal into [`BlockDescriptor`]s with depth and path
//! - **Matching**: [`SectionQuery`] filters descriptors under an explicit [`MatchMode`]
//! - **Aggregation**: per-page [`PageSummary`] and cross-page [`Inventory`]
//! - **Retrieval**: the [`PageSource`] seam, backed by [`ContentClient`] or [`StaticPages`]
//! - **Analysis**: [`SectionAnalyzer`] ties retrieval and the pure operations together
//!
//! ## Quick Start
//!
//! ```rust
//! use blockscope_core::{PageSummary, SectionQuery, blocks_from_value, filter, flatten};
//! use serde_json::json;
//!
//! let blocks = blocks_from_value(&json!([
//!     { "@type": "Hero", "id": "top" },
//!     { "@type": "Columns", "children": [{ "@type": "Hero", "id": "inner" }] }
//! ]));
//!
//! let sections = flatten(&blocks);
//! let heroes = filter(&sections, &SectionQuery::exact("Hero"));
//! assert_eq!(heroes.len(), 2);
//!
//! let summary = PageSummary::from_descriptors(&sections);
//! assert_eq!(summary.unique_types, 2);
//! ```
//!
//! ## Error Handling
//!
//! The block-tree operations are total. Retrieval, configuration and pattern
//! compilation return [`Result<T, Error>`]:
//!
//! ```rust
//! use blockscope_core::{Error, MatchMode, SectionQuery};
//!
//! match SectionQuery::new("(unclosed", MatchMode::Pattern) {
//!     Ok(_) => println!("compiled"),
//!     Err(Error::InvalidQuery(msg)) => eprintln!("bad pattern: {msg}"),
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//! }
//! ```

/// Section questions over a page source
pub mod analyzer;
/// Lenient block tree model
pub mod block;
/// Content API client
pub mod client;
/// Configuration loading and environment overrides
pub mod config;
/// Per-block descriptors and structural paths
pub mod descriptor;
/// Error types and result aliases
pub mod error;
/// Pre-order flattening with a depth bound
pub mod flatten;
/// Section matching modes and filtering
pub mod matcher;
/// Page entries and lookup strategies
pub mod page;
/// Page source trait and the in-memory source
pub mod source;
/// Page statistics and the cross-page inventory
pub mod summary;

// Re-export commonly used types
pub use analyzer::{MatchedSection, PageMatch, PageMatchReport, SectionAnalyzer, SectionsReport, Strategy};
pub use block::{BlockNode, Children, Component, blocks_from_value, node_count};
pub use client::{ContentClient, SECTION_QUERY_FIELDS, section_queries};
pub use config::{AnalysisConfig, ApiConfig, Config};
pub use descriptor::{BlockDescriptor, BlockPath, ParsePathError, UNKNOWN_KIND};
pub use error::{Error, Result};
pub use flatten::{DEFAULT_MAX_DEPTH, Flattened, Flattener, flatten, flatten_value};
pub use matcher::{MatchMode, SectionQuery, filter};
pub use page::{ContentResponse, LookupStrategy, Page, PageData, PageRef, QueryEntry};
pub use source::{PageSource, StaticPages};
pub use summary::{Inventory, InventoryBuilder, InventoryEntry, InventoryExample, PageSummary};
