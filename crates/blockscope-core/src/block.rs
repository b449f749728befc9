//! Block tree model for headless-CMS page content.
//!
//! Content APIs return each page's layout as a loosely typed JSON tree. Any
//! field may be missing or carry an unexpected type, and `children` is either
//! a list of nested blocks or, in one degenerate case, a single literal string
//! standing in for text content. [`BlockNode::from_value`] turns that shape
//! into a typed tree without ever failing.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// The children of a block.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Children {
    /// No `children` field, or one that is neither a list nor a string.
    #[default]
    None,
    /// Nested blocks, in source order. May be empty.
    Nodes(Vec<BlockNode>),
    /// A single literal string standing in for text content.
    ///
    /// Produced for `children: ["text"]` and `children: "text"`. Such a block
    /// is a leaf.
    LiteralText(String),
}

impl Children {
    /// Nested child blocks; empty for [`Children::None`] and [`Children::LiteralText`].
    pub fn nodes(&self) -> &[BlockNode] {
        match self {
            Self::Nodes(nodes) => nodes,
            Self::None | Self::LiteralText(_) => &[],
        }
    }

    /// The literal text, if this is the single-string case.
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Self::LiteralText(text) => Some(text),
            Self::None | Self::Nodes(_) => None,
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => match items.as_slice() {
                [Value::String(text)] => Self::LiteralText(text.clone()),
                _ => Self::Nodes(items.iter().map(BlockNode::from_value).collect()),
            },
            Some(Value::String(text)) => Self::LiteralText(text.clone()),
            _ => Self::None,
        }
    }
}

/// The component a block instantiates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    /// Registered component name, e.g. `"Text"` or `"Hero"`.
    pub name: Option<String>,
    /// Component options; the source of the block's text and properties.
    pub options: Map<String, Value>,
}

/// One node of a page's content tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockNode {
    /// Explicit `@type` field, e.g. `"@builder.io/sdk:Element"`.
    pub type_tag: Option<String>,
    /// Opaque identifier, unique within a page.
    pub id: Option<String>,
    /// Rendering tag hint.
    pub tag_name: Option<String>,
    /// Direct `text` field.
    pub text: Option<String>,
    /// Component instance, when the block is a component.
    pub component: Option<Component>,
    /// Nested content.
    pub children: Children,
    /// Opaque `responsiveStyles` mapping, carried through uninterpreted.
    pub responsive_styles: Option<Value>,
    /// Opaque `bindings` mapping, carried through uninterpreted.
    pub bindings: Option<Value>,
}

impl BlockNode {
    /// Build a node from untyped JSON.
    ///
    /// Total over all inputs: wrong-typed fields become `None`, a bare string
    /// becomes a node whose `text` is that string, and any other non-object
    /// becomes an empty node.
    pub fn from_value(value: &Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            Value::String(text) => {
                return Self {
                    text: Some(text.clone()),
                    ..Self::default()
                };
            },
            _ => return Self::default(),
        };

        let component = object.get("component").and_then(Value::as_object).map(|c| Component {
            name: string_field(c, "name"),
            options: c
                .get("options")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        });

        Self {
            type_tag: string_field(object, "@type"),
            id: string_field(object, "id"),
            tag_name: string_field(object, "tagName"),
            text: string_field(object, "text"),
            component,
            children: Children::from_value(object.get("children")),
            responsive_styles: opaque_field(object, "responsiveStyles"),
            bindings: opaque_field(object, "bindings"),
        }
    }

    /// The component name, if the block is a component.
    pub fn component_name(&self) -> Option<&str> {
        self.component.as_ref().and_then(|c| c.name.as_deref())
    }

    /// The component options, or `None` when the block has no component.
    pub fn component_options(&self) -> Option<&Map<String, Value>> {
        self.component.as_ref().map(|c| &c.options)
    }
}

impl<'de> Deserialize<'de> for BlockNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Build the root block sequence from untyped JSON.
///
/// Anything other than an array yields an empty sequence.
pub fn blocks_from_value(value: &Value) -> Vec<BlockNode> {
    value
        .as_array()
        .map(|items| items.iter().map(BlockNode::from_value).collect())
        .unwrap_or_default()
}

/// Count every node in the tree, descendants included.
pub fn node_count(blocks: &[BlockNode]) -> usize {
    blocks
        .iter()
        .map(|block| 1 + node_count(block.children.nodes()))
        .sum()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn opaque_field(object: &Map<String, Value>, key: &str) -> Option<Value> {
    object.get(key).filter(|v| !v.is_null()).cloned()
}
