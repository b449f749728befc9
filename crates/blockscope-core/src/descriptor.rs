//! Flat descriptors of individual blocks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::block::{BlockNode, Children};

/// Kind assigned to blocks with neither an `@type` nor a component name.
pub const UNKNOWN_KIND: &str = "Unknown";

/// Structural position of a block: sibling indices from the root.
///
/// Rendered dot-separated (`"2.0.1"`). The root sequence itself is the empty
/// path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPath(Vec<usize>);

impl BlockPath {
    /// The empty path.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this path.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(index);
        Self(segments)
    }

    /// Sibling indices from the root.
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Follow this path from the root block sequence back to its node.
    pub fn resolve<'a>(&self, blocks: &'a [BlockNode]) -> Option<&'a BlockNode> {
        let (first, rest) = self.0.split_first()?;
        let mut node = blocks.get(*first)?;
        for index in rest {
            node = node.children.nodes().get(*index)?;
        }
        Some(node)
    }
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Error returned when a dotted path contains a non-numeric segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePathError(String);

impl fmt::Display for ParsePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid block path segment '{}'", self.0)
    }
}

impl std::error::Error for ParsePathError {}

impl FromStr for BlockPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        s.split('.')
            .map(|segment| {
                segment
                    .parse::<usize>()
                    .map_err(|_| ParsePathError(segment.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for BlockPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Flat, positioned description of one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    /// Resolved kind: `@type`, else component name, else [`UNKNOWN_KIND`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Component name, when the block is a component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// Block identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rendering tag hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    /// Nesting depth; 0 for the root sequence.
    pub depth: usize,
    /// Sibling indices from the root.
    pub path: BlockPath,
    /// Number of nested child blocks. Literal text children count as zero.
    #[serde(rename = "childrenCount")]
    pub child_count: usize,
    /// Whether the block has any nested child blocks.
    pub has_children: bool,
    /// Extracted text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Raw component options.
    pub properties: Map<String, Value>,
    /// Opaque responsive styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
    /// Opaque bindings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Value>,
}

impl BlockDescriptor {
    /// Describe a single block, independent of its position in the tree.
    ///
    /// The returned descriptor sits at depth 0 with the root path; use
    /// [`BlockDescriptor::at`] to position it.
    pub fn extract(node: &BlockNode) -> Self {
        let child_count = node.children.nodes().len();
        Self {
            kind: resolve_kind(node).to_string(),
            component_name: node.component_name().map(str::to_string),
            id: node.id.clone(),
            tag_name: node.tag_name.clone(),
            depth: 0,
            path: BlockPath::root(),
            child_count,
            has_children: child_count > 0,
            text: extract_text(node).map(str::to_string),
            properties: node.component_options().cloned().unwrap_or_default(),
            styles: node.responsive_styles.clone(),
            bindings: node.bindings.clone(),
        }
    }

    /// Position this descriptor in a tree.
    #[must_use]
    pub fn at(mut self, depth: usize, path: BlockPath) -> Self {
        self.depth = depth;
        self.path = path;
        self
    }
}

/// Resolve a block's kind.
pub fn resolve_kind(node: &BlockNode) -> &str {
    node.type_tag
        .as_deref()
        .or_else(|| node.component_name())
        .unwrap_or(UNKNOWN_KIND)
}

/// Extract a block's text content, first match wins:
///
/// 1. non-empty `component.options.text`
/// 2. non-empty direct `text` field
/// 3. the single literal-string child
pub fn extract_text(node: &BlockNode) -> Option<&str> {
    let from_options = node
        .component_options()
        .and_then(|options| options.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());

    from_options
        .or_else(|| node.text.as_deref().filter(|text| !text.is_empty()))
        .or_else(|| match &node.children {
            Children::LiteralText(text) => Some(text.as_str()),
            Children::None | Children::Nodes(_) => None,
        })
}
