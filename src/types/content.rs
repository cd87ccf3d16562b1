use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node inside a table cell: an element with children, or a text leaf.
///
/// The JSON shape follows the host document model:
/// - element: `{"type": "p", "children": [...], ...attributes}`
/// - text: `{"text": "Hello", ...marks}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Element(ElementNode),
    Text(TextNode),
}

/// Block or inline element (paragraph, image, link, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<ContentNode>,
    /// Attributes the engine does not interpret (url, align, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Text leaf with optional marks (`bold`, `italic`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(flatten)]
    pub marks: Map<String, Value>,
}

impl ContentNode {
    /// Create a plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            text: text.into(),
            marks: Map::new(),
        })
    }

    /// Create an element with the given type and children.
    pub fn element(kind: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self::Element(ElementNode {
            kind: kind.into(),
            children,
            attributes: Map::new(),
        })
    }

    /// Concatenated text of every leaf below this node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    pub(crate) fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(leaf) => out.push_str(&leaf.text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}
