//! Descriptive counts for a document that passed validation

use serde::Serialize;
use std::collections::BTreeSet;

use crate::schema::shape::{Shape, WRAPPER_KEY};
use crate::yaml::Node;

const MITRE_ATLAS: &str = "mitre_atlas";
const OWASP_GENAI: &str = "owasp_genai";

/// Read-only statistics shown after a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Summary {
    Legacy {
        pillars: usize,
        domains: usize,
        questions: usize,
        key_controls: usize,
        mitre_atlas: bool,
        owasp_genai: bool,
    },
    Structured {
        components: usize,
        domains: usize,
        questions: usize,
        /// Framework names used as `mappings` keys, sorted
        frameworks: Vec<String>,
    },
}

/// Compute the summary. Only meaningful when the defect list is empty;
/// returns `None` for [`Shape::Unknown`].
pub fn summarize(doc: &Node, shape: Shape) -> Option<Summary> {
    match shape {
        Shape::Legacy => Some(summarize_legacy(doc)),
        Shape::Structured => Some(summarize_structured(doc)),
        Shape::Unknown => None,
    }
}

fn summarize_legacy(doc: &Node) -> Summary {
    let domains: Vec<&Node> = doc
        .get("domains")
        .and_then(Node::as_mapping)
        .map(|entries| entries.iter().map(|(_, d)| d).collect())
        .unwrap_or_default();

    let count = |field: &str| -> usize {
        domains
            .iter()
            .filter_map(|d| d.get(field))
            .map(Node::len)
            .sum()
    };

    Summary::Legacy {
        pillars: doc.get("pillars").map_or(0, Node::len),
        domains: domains.len(),
        questions: count("questions"),
        key_controls: count("key_controls"),
        mitre_atlas: domains.iter().any(|d| d.mentions(MITRE_ATLAS)),
        owasp_genai: domains.iter().any(|d| d.mentions(OWASP_GENAI)),
    }
}

fn summarize_structured(doc: &Node) -> Summary {
    let wrapper = doc.get(WRAPPER_KEY);
    let components = wrapper
        .and_then(|w| w.get("components"))
        .and_then(Node::as_sequence)
        .unwrap_or_default();

    let mut domains = 0;
    let mut frameworks = BTreeSet::new();
    for domain in components
        .iter()
        .filter_map(|c| c.get("domains"))
        .filter_map(Node::as_sequence)
        .flatten()
    {
        domains += 1;
        if let Some(mappings) = domain.get("mappings").and_then(Node::as_mapping) {
            frameworks.extend(mappings.iter().map(|(name, _)| name.clone()));
        }
    }

    let questions = wrapper
        .and_then(|w| w.get("assessment_questionnaire"))
        .and_then(|q| q.get("questions"))
        .map_or(0, Node::len);

    Summary::Structured {
        components: components.len(),
        domains,
        questions,
        frameworks: frameworks.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_document;

    #[test]
    fn test_legacy_summary() {
        let doc = parse_document(
            r#"
pillars: {a: {}, b: {}}
domains:
  one:
    framework_alignment: ["mitre_atlas: AML.T0010"]
    key_controls: [k1, k2]
    questions: [{id: q1}, {id: q2}]
  two:
    key_controls: [k3]
"#,
            "doc.yaml",
        )
        .unwrap();

        assert_eq!(
            summarize(&doc, Shape::Legacy),
            Some(Summary::Legacy {
                pillars: 2,
                domains: 2,
                questions: 2,
                key_controls: 3,
                mitre_atlas: true,
                owasp_genai: false,
            })
        );
    }

    #[test]
    fn test_structured_summary() {
        let doc = parse_document(
            r#"
aismm:
  components:
    - domains:
        - mappings: {owasp_genai: [LLM01], mitre_atlas: []}
        - mappings: {nist_ai_rmf: []}
    - domains:
        - id: x
  assessment_questionnaire:
    questions: [{id: q1}, {id: q2}, {id: q3}]
"#,
            "doc.yaml",
        )
        .unwrap();

        assert_eq!(
            summarize(&doc, Shape::Structured),
            Some(Summary::Structured {
                components: 2,
                domains: 3,
                questions: 3,
                frameworks: vec![
                    "mitre_atlas".to_string(),
                    "nist_ai_rmf".to_string(),
                    "owasp_genai".to_string(),
                ],
            })
        );
    }

    #[test]
    fn test_unknown_has_no_summary() {
        assert_eq!(summarize(&Node::Null, Shape::Unknown), None);
    }
}
