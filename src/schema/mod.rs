//! Schema system - shape detection, structural validation and summaries
//!
//! The document has two historical layouts. [`detect_shape`] picks one,
//! then exactly one rule set runs over the tree. Rule sets never raise for
//! bad data; every violation becomes a [`Defect`] and scanning continues.

pub mod defect;
pub mod legacy;
pub mod question;
pub mod shape;
pub mod structured;
pub mod summary;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::yaml::Node;

pub use defect::{Defect, DefectKind};
pub use question::QuestionType;
pub use shape::{detect_shape, Shape};
pub use summary::{summarize, Summary};

/// Neither (or both) layout signatures were found
#[derive(Debug, Error, Diagnostic)]
#[error(
    "Unable to detect AISMM version. Expected either an '{}' key containing 'components' (v2.x) or 'domains' + 'pillars' keys (v1.x)",
    shape::WRAPPER_KEY
)]
#[diagnostic(
    code(aismm::schema::unknown_shape),
    help("A document must match exactly one layout; remove the keys of the other one")
)]
pub struct UnknownShapeError;

/// Outcome of a structural validation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub shape: Shape,
    pub defects: Vec<Defect>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.defects.is_empty()
    }
}

/// Detect the layout and run the matching rule set
pub fn validate(doc: &Node) -> Result<ValidationReport, UnknownShapeError> {
    let shape = detect_shape(doc);
    let defects = match shape {
        Shape::Legacy => legacy::validate(doc),
        Shape::Structured => structured::validate(doc),
        Shape::Unknown => return Err(UnknownShapeError),
    };

    Ok(ValidationReport { shape, defects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_document;

    #[test]
    fn test_unknown_shape_stops_before_rules() {
        let doc = parse_document("title: nothing recognisable\n", "doc.yaml").unwrap();
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn test_both_signatures_rejected() {
        let doc = parse_document(
            "aismm:\n  components: []\ndomains: {}\npillars: {}\n",
            "doc.yaml",
        )
        .unwrap();
        assert!(validate(&doc).is_err());
    }

    #[test]
    fn test_dispatches_to_structured_rules() {
        let doc = parse_document("aismm:\n  components: []\n", "doc.yaml").unwrap();
        let report = validate(&doc).unwrap();
        assert_eq!(report.shape, Shape::Structured);
        assert_eq!(report.defects.len(), 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_dispatches_to_legacy_rules() {
        let doc = parse_document("domains: {}\npillars: {}\n", "doc.yaml").unwrap();
        let report = validate(&doc).unwrap();
        assert_eq!(report.shape, Shape::Legacy);
        assert!(report
            .defects
            .iter()
            .all(|d| d.kind == DefectKind::MissingField));
    }

    #[test]
    fn test_error_names_both_signatures() {
        let msg = UnknownShapeError.to_string();
        assert!(msg.contains("'aismm'"));
        assert!(msg.contains("'domains' + 'pillars'"));
    }
}
