//! Document shape detection
//!
//! The definition file has used two layouts over its lifetime. The shape is
//! inferred from which keys are present, never from a version field, because
//! a hand-edited version tag can go stale.

use serde::Serialize;
use std::fmt;

use crate::yaml::Node;

/// Top-level key that wraps the structured layout
pub const WRAPPER_KEY: &str = "aismm";

/// Schema layout of a definition document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// v1.x: top-level `domains`, `pillars`, `scoring_config`
    Legacy,
    /// v2.x: `aismm` wrapper holding `components` and a questionnaire
    Structured,
    /// Neither signature, or both
    Unknown,
}

impl Shape {
    /// Version family shown to authors
    pub fn version_label(self) -> &'static str {
        match self {
            Shape::Legacy => "1.x",
            Shape::Structured => "2.x",
            Shape::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Legacy => f.write_str("legacy"),
            Shape::Structured => f.write_str("structured"),
            Shape::Unknown => f.write_str("unknown"),
        }
    }
}

/// Classify a parsed document
pub fn detect_shape(doc: &Node) -> Shape {
    if doc.as_mapping().is_none() {
        return Shape::Unknown;
    }

    let structured = doc
        .get(WRAPPER_KEY)
        .map_or(false, |inner| inner.contains_key("components"));
    let legacy = doc.contains_key("domains") && doc.contains_key("pillars");

    let shape = match (structured, legacy) {
        (true, false) => Shape::Structured,
        (false, true) => Shape::Legacy,
        _ => Shape::Unknown,
    };

    tracing::debug!(%shape, structured, legacy, "detected document shape");
    shape
}
