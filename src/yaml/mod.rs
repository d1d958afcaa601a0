//! YAML loading and diagnostics

pub mod diagnostics;
pub mod loader;
pub mod node;

pub use diagnostics::{TabCharacterError, YamlSyntaxError};
pub use loader::{load_document, parse_document, LoadError};
pub use node::{Node, NodeKind};
