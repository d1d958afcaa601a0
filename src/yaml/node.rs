//! Generic document tree
//!
//! The validator never works on `serde_yml::Value` directly. Parsed YAML is
//! lowered into a small closed [`Node`] type so traversal code can match
//! exhaustively on what it finds.

use std::fmt;

/// A parsed YAML value
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    /// Entries in document order
    Mapping(Vec<(String, Node)>),
}

/// The kind of a [`Node`], used in type-mismatch messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl NodeKind {
    /// Human-facing noun used in "should be a ..." messages
    pub fn noun(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Integer => "integer",
            NodeKind::Float => "number",
            NodeKind::String => "string",
            NodeKind::Sequence => "list",
            NodeKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Integer(_) => NodeKind::Integer,
            Node::Float(_) => NodeKind::Float,
            Node::String(_) => NodeKind::String,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Look up a key if this node is a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Number of entries in a mapping or items in a sequence, zero otherwise
    pub fn len(&self) -> usize {
        match self {
            Node::Mapping(entries) => entries.len(),
            Node::Sequence(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `needle` occurs in any key or string scalar below this node
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Node::String(s) => s.contains(needle),
            Node::Sequence(items) => items.iter().any(|n| n.mentions(needle)),
            Node::Mapping(entries) => entries
                .iter()
                .any(|(k, v)| k.contains(needle) || v.mentions(needle)),
            _ => false,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Integer(i) => write!(f, "{}", i),
            Node::Float(x) => write!(f, "{}", x),
            Node::String(s) => f.write_str(s),
            Node::Sequence(_) => f.write_str("<list>"),
            Node::Mapping(_) => f.write_str("<mapping>"),
        }
    }
}

impl From<serde_yml::Value> for Node {
    fn from(value: serde_yml::Value) -> Self {
        use serde_yml::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Integer(i)
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::String(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_text(k), Node::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

/// Render a mapping key as text. Scalars keep their literal form.
fn key_text(key: serde_yml::Value) -> String {
    match Node::from(key) {
        Node::String(s) => s,
        scalar @ (Node::Null | Node::Bool(_) | Node::Integer(_) | Node::Float(_)) => {
            scalar.to_string()
        }
        complex => format!("{:?}", complex),
    }
}
