//! Structural defects and the collector the rule sets write into

use serde::Serialize;
use std::fmt;

use crate::yaml::{Node, NodeKind};

/// Category of a structural defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    WrongType,
    MissingField,
    InvalidEnumValue,
    MissingLevels,
    UnexpectedLevels,
    DuplicateLevel,
    InvalidLevel,
    DanglingReference,
}

/// A single structural violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Defect {
    /// Location of the offending element, e.g. `components[1].domains[2]`
    pub path: String,
    pub kind: DefectKind,
    pub message: String,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Dotted location inside the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(String);

impl Path {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{}", self.0, key))
        }
    }

    /// Append a 1-based element index
    pub fn index(&self, position: usize) -> Self {
        Self(format!("{}[{}]", self.0, position))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered defect accumulator
#[derive(Debug, Default)]
pub struct Defects {
    items: Vec<Defect>,
}

impl Defects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &Path, kind: DefectKind, message: String) {
        tracing::trace!(path = %path, ?kind, "defect");
        self.items.push(Defect {
            path: path.as_str().to_string(),
            kind,
            message,
        });
    }

    pub fn wrong_type(&mut self, path: &Path, expected: NodeKind) {
        let message = if path.is_root() {
            format!("document root should be a {}", expected)
        } else {
            format!("{} should be a {}", path, expected)
        };
        self.push(path, DefectKind::WrongType, message);
    }

    pub fn missing(&mut self, path: &Path, field: &str) {
        let message = if path.is_root() {
            format!("Missing required top-level key: '{}'", field)
        } else {
            format!("{} missing '{}'", path, field)
        };
        self.push(path, DefectKind::MissingField, message);
    }

    /// Record one defect per field of `fields` absent from `node`
    pub fn require_fields(&mut self, node: &Node, path: &Path, fields: &[&str]) {
        for field in fields {
            if !node.contains_key(field) {
                self.missing(path, field);
            }
        }
    }

    /// Type-check `node` as a mapping; records a defect and returns `None` on mismatch
    pub fn expect_mapping<'a>(
        &mut self,
        node: &'a Node,
        path: &Path,
    ) -> Option<&'a [(String, Node)]> {
        let entries = node.as_mapping();
        if entries.is_none() {
            self.wrong_type(path, NodeKind::Mapping);
        }
        entries
    }

    /// Type-check `node` as a sequence; records a defect and returns `None` on mismatch
    pub fn expect_sequence<'a>(&mut self, node: &'a Node, path: &Path) -> Option<&'a [Node]> {
        let items = node.as_sequence();
        if items.is_none() {
            self.wrong_type(path, NodeKind::Sequence);
        }
        items
    }

    /// Optional field that must be a sequence when present
    pub fn optional_sequence<'a>(
        &mut self,
        parent: &'a Node,
        parent_path: &Path,
        field: &str,
    ) -> Option<&'a [Node]> {
        let node = parent.get(field)?;
        self.expect_sequence(node, &parent_path.key(field))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Defect> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rendering() {
        let p = Path::root().key("components").index(1).key("domains").index(2);
        assert_eq!(p.as_str(), "components[1].domains[2]");
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_missing_messages() {
        let mut defects = Defects::new();
        defects.missing(&Path::root(), "version");
        defects.missing(&Path::root().key("pillars").key("governance"), "weight");
        let items = defects.into_vec();
        assert_eq!(items[0].message, "Missing required top-level key: 'version'");
        assert_eq!(items[1].message, "pillars.governance missing 'weight'");
        assert!(items.iter().all(|d| d.kind == DefectKind::MissingField));
    }

    #[test]
    fn test_optional_sequence_absent_is_fine() {
        let node = Node::Mapping(vec![("id".into(), Node::String("x".into()))]);
        let mut defects = Defects::new();
        assert!(defects
            .optional_sequence(&node, &Path::root().key("domains").key("x"), "key_controls")
            .is_none());
        assert!(defects.is_empty());
    }

    #[test]
    fn test_optional_sequence_wrong_type() {
        let node = Node::Mapping(vec![("key_controls".into(), Node::String("x".into()))]);
        let mut defects = Defects::new();
        defects.optional_sequence(&node, &Path::root().key("domains").key("d"), "key_controls");
        let items = defects.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, "domains.d.key_controls should be a list");
        assert_eq!(items[0].kind, DefectKind::WrongType);
    }
}
