//! Pre-order flattening of block trees.
//!
//! Each block becomes one [`BlockDescriptor`] carrying its nesting depth and
//! structural path. Parents are emitted before their descendants and siblings
//! keep their source order, so the output can be read top to bottom as the
//! page renders.
//!
//! ```rust
//! use blockscope_core::{blocks_from_value, flatten};
//! use serde_json::json;
//!
//! let blocks = blocks_from_value(&json!([
//!     { "@type": "Text", "id": "a" },
//!     { "@type": "Hero", "id": "b", "children": [{ "@type": "Text", "id": "c" }] }
//! ]));
//!
//! let flat = flatten(&blocks);
//! let paths: Vec<String> = flat.iter().map(|d| d.path.to_string()).collect();
//! assert_eq!(paths, ["0", "1", "1.0"]);
//! assert_eq!(flat[2].depth, 1);
//! ```

use serde_json::Value;
use tracing::warn;

use crate::block::{BlockNode, blocks_from_value};
use crate::descriptor::{BlockDescriptor, BlockPath};

/// Default nesting bound for [`Flattener`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Result of a bounded flatten pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    /// Descriptors in pre-order.
    pub descriptors: Vec<BlockDescriptor>,
    /// Number of blocks whose children were not visited because the depth
    /// bound was reached.
    pub truncated: usize,
}

/// Configurable flattener.
#[derive(Debug, Clone, Copy)]
pub struct Flattener {
    max_depth: usize,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

impl Flattener {
    /// Flattener with [`DEFAULT_MAX_DEPTH`].
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the deepest depth whose children are still visited.
    ///
    /// Blocks at `max_depth` are emitted but not descended into.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Flatten a root block sequence.
    pub fn flatten(&self, blocks: &[BlockNode]) -> Flattened {
        let mut out = Flattened::default();
        self.walk(blocks, 0, &BlockPath::root(), &mut out);
        if out.truncated > 0 {
            warn!(
                "Block tree deeper than {} levels; {} subtree(s) not descended",
                self.max_depth, out.truncated
            );
        }
        out
    }

    fn walk(&self, blocks: &[BlockNode], depth: usize, parent: &BlockPath, out: &mut Flattened) {
        for (index, block) in blocks.iter().enumerate() {
            let path = parent.child(index);
            out.descriptors
                .push(BlockDescriptor::extract(block).at(depth, path.clone()));

            let children = block.children.nodes();
            if children.is_empty() {
                continue;
            }
            if depth >= self.max_depth {
                out.truncated += 1;
                continue;
            }
            self.walk(children, depth + 1, &path, out);
        }
    }
}

/// Flatten a root block sequence with the default depth bound.
pub fn flatten(blocks: &[BlockNode]) -> Vec<BlockDescriptor> {
    Flattener::new().flatten(blocks).descriptors
}

/// Flatten an untyped JSON root; anything other than an array yields nothing.
pub fn flatten_value(value: &Value) -> Vec<BlockDescriptor> {
    flatten(&blocks_from_value(value))
}
