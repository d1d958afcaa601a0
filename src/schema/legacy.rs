//! Rules for the legacy (v1.x) layout
//!
//! Flat document: `scoring_config`, a `pillars` mapping and a `domains`
//! mapping keyed by domain id. Each domain points at a pillar and carries
//! exactly five `level_N` entries.

use crate::schema::defect::{Defect, DefectKind, Defects, Path};
use crate::schema::question::QuestionType;
use crate::yaml::{Node, NodeKind};

const ROOT_FIELDS: [&str; 6] = [
    "version",
    "name",
    "description",
    "scoring_config",
    "pillars",
    "domains",
];
const SCORING_FIELDS: [&str; 2] = ["level_scores", "maturity_thresholds"];
const PILLAR_FIELDS: [&str; 4] = ["id", "name", "description", "weight"];
const DOMAIN_FIELDS: [&str; 5] = ["id", "name", "description", "pillar", "levels"];
const QUESTION_FIELDS: [&str; 2] = ["id", "text"];

/// Canonical level keys, in order
pub const LEVEL_KEYS: [&str; 5] = ["level_1", "level_2", "level_3", "level_4", "level_5"];

/// Older documents spell the question type field this way
const LEGACY_TYPE_FIELD: &str = "question_type";

/// Validate a legacy document, returning defects in discovery order
pub fn validate(doc: &Node) -> Vec<Defect> {
    let mut defects = Defects::new();
    let root = Path::root();

    if defects.expect_mapping(doc, &root).is_none() {
        return defects.into_vec();
    }
    defects.require_fields(doc, &root, &ROOT_FIELDS);

    check_scoring_config(doc, &mut defects);
    let pillars = check_pillars(doc, &mut defects);
    check_domains(doc, pillars.as_deref(), &mut defects);

    tracing::debug!(defects = defects.len(), "legacy rules finished");
    defects.into_vec()
}

fn check_scoring_config(doc: &Node, defects: &mut Defects) {
    let Some(config) = doc.get("scoring_config") else {
        return;
    };
    let path = Path::root().key("scoring_config");
    if defects.expect_mapping(config, &path).is_some() {
        defects.require_fields(config, &path, &SCORING_FIELDS);
    }
}

/// Returns the declared pillar keys when `pillars` is a mapping
fn check_pillars<'a>(doc: &'a Node, defects: &mut Defects) -> Option<Vec<&'a str>> {
    let pillars = doc.get("pillars")?;
    let path = Path::root().key("pillars");
    let entries = defects.expect_mapping(pillars, &path)?;

    for (key, pillar) in entries {
        let pillar_path = path.key(key);
        if defects.expect_mapping(pillar, &pillar_path).is_some() {
            defects.require_fields(pillar, &pillar_path, &PILLAR_FIELDS);
        }
    }

    Some(entries.iter().map(|(k, _)| k.as_str()).collect())
}

fn check_domains(doc: &Node, pillars: Option<&[&str]>, defects: &mut Defects) {
    let Some(domains) = doc.get("domains") else {
        return;
    };
    let path = Path::root().key("domains");
    let Some(entries) = defects.expect_mapping(domains, &path) else {
        return;
    };

    tracing::debug!(count = entries.len(), "checking legacy domains");

    for (key, domain) in entries {
        let domain_path = path.key(key);
        if defects.expect_mapping(domain, &domain_path).is_none() {
            continue;
        }
        defects.require_fields(domain, &domain_path, &DOMAIN_FIELDS);

        if let Some(pillar) = domain.get("pillar") {
            check_pillar_reference(pillar, &domain_path, pillars, defects);
        }
        if let Some(levels) = domain.get("levels") {
            check_levels(levels, &domain_path.key("levels"), defects);
        }
        defects.optional_sequence(domain, &domain_path, "framework_alignment");
        defects.optional_sequence(domain, &domain_path, "key_controls");

        if let Some(questions) = defects.optional_sequence(domain, &domain_path, "questions") {
            let questions_path = domain_path.key("questions");
            for (i, question) in questions.iter().enumerate() {
                check_question(question, &questions_path.index(i + 1), defects);
            }
        }
    }
}

fn check_pillar_reference(
    pillar: &Node,
    domain_path: &Path,
    pillars: Option<&[&str]>,
    defects: &mut Defects,
) {
    let path = domain_path.key("pillar");
    let Some(reference) = pillar.as_str() else {
        defects.wrong_type(&path, NodeKind::String);
        return;
    };

    // A malformed pillars collection has already been reported on its own
    let Some(declared) = pillars else {
        return;
    };
    if !declared.contains(&reference) {
        let message = format!("{} '{}' not found in pillars definition", path, reference);
        defects.push(&path, DefectKind::DanglingReference, message);
    }
}

fn check_levels(levels: &Node, path: &Path, defects: &mut Defects) {
    let Some(entries) = defects.expect_mapping(levels, path) else {
        return;
    };

    let missing: Vec<&str> = LEVEL_KEYS
        .iter()
        .copied()
        .filter(|expected| !entries.iter().any(|(k, _)| k == expected))
        .collect();
    let unexpected: Vec<&str> = entries
        .iter()
        .map(|(k, _)| k.as_str())
        .filter(|k| !LEVEL_KEYS.contains(k))
        .collect();

    if !missing.is_empty() {
        let message = format!("{} missing: {}", path, missing.join(", "));
        defects.push(path, DefectKind::MissingLevels, message);
    }
    if !unexpected.is_empty() {
        let message = format!("{} has unexpected keys: {}", path, unexpected.join(", "));
        defects.push(path, DefectKind::UnexpectedLevels, message);
    }
}

fn check_question(question: &Node, path: &Path, defects: &mut Defects) {
    if defects.expect_mapping(question, path).is_none() {
        return;
    }
    defects.require_fields(question, path, &QUESTION_FIELDS);

    match question
        .get("type")
        .or_else(|| question.get(LEGACY_TYPE_FIELD))
    {
        Some(value) => {
            QuestionType::check(value, path, defects);
        }
        None => defects.missing(path, "type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_document;

    const VALID: &str = r#"
version: "1.3"
name: AI Security Maturity Model
description: Maturity model for AI security programs
scoring_config:
  level_scores: {level_1: 1, level_2: 2, level_3: 3, level_4: 4, level_5: 5}
  maturity_thresholds: {initial: 0, managed: 2.5}
pillars:
  governance:
    id: governance
    name: Governance
    description: Policy and oversight
    weight: 0.5
  operations:
    id: operations
    name: Operations
    description: Day-to-day defence
    weight: 0.5
domains:
  ai_security_standards:
    id: ai_security_standards
    name: AI Security Standards
    description: Standards for AI systems
    pillar: governance
    levels:
      level_1: Ad hoc
      level_2: Repeatable
      level_3: Defined
      level_4: Managed
      level_5: Optimized
    framework_alignment:
      - NIST AI RMF GOVERN 1.1
    key_controls:
      - Documented AI security policy
    questions:
      - id: q1
        text: Do you have an AI security policy?
        type: true_false
  incident_response:
    id: incident_response
    name: Incident Response
    description: Handling AI incidents
    pillar: operations
    levels:
      level_1: a
      level_2: b
      level_3: c
      level_4: d
      level_5: e
"#;

    fn run(text: &str) -> Vec<Defect> {
        validate(&parse_document(text, "doc.yaml").unwrap())
    }

    #[test]
    fn test_valid_document_has_no_defects() {
        let defects = run(VALID);
        assert!(defects.is_empty(), "unexpected defects: {:?}", defects);
    }

    #[test]
    fn test_missing_level_reported() {
        let text = VALID.replace("      level_5: Optimized\n", "");
        let defects = run(&text);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::MissingLevels);
        assert_eq!(
            defects[0].message,
            "domains.ai_security_standards.levels missing: level_5"
        );
    }

    #[test]
    fn test_missing_and_extra_levels_in_same_run() {
        let text = VALID
            .replace("      level_5: Optimized\n", "")
            .replace("      level_5: e\n", "      level_5: e\n      level_6: f\n");
        let defects = run(&text);
        assert_eq!(defects.len(), 2);
        assert_eq!(defects[0].kind, DefectKind::MissingLevels);
        assert!(defects[0].message.contains("level_5"));
        assert_eq!(defects[1].kind, DefectKind::UnexpectedLevels);
        assert_eq!(
            defects[1].message,
            "domains.incident_response.levels has unexpected keys: level_6"
        );
    }

    #[test]
    fn test_dangling_pillar_reference_does_not_stop_scan() {
        let text = VALID
            .replace("    pillar: governance\n", "    pillar: strategy\n")
            .replace("      level_5: e\n", "");
        let defects = run(&text);
        assert_eq!(defects.len(), 2);
        assert_eq!(defects[0].kind, DefectKind::DanglingReference);
        assert_eq!(
            defects[0].message,
            "domains.ai_security_standards.pillar 'strategy' not found in pillars definition"
        );
        assert_eq!(defects[1].path, "domains.incident_response.levels");
    }

    #[test]
    fn test_malformed_pillars_skips_reference_check() {
        let text = VALID.replace(
            "pillars:\n  governance:",
            "pillars: [governance, operations]\nunused:\n  governance:",
        );
        let defects = run(&text);
        assert_eq!(defects.len(), 1, "{:?}", defects);
        assert_eq!(defects[0].message, "pillars should be a mapping");
    }

    #[test]
    fn test_invalid_question_type() {
        let text = VALID.replace("type: true_false", "type: essay");
        let defects = run(&text);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].kind, DefectKind::InvalidEnumValue);
        assert!(defects[0].message.contains("'essay'"));
        assert_eq!(defects[0].path, "domains.ai_security_standards.questions[1]");
    }

    #[test]
    fn test_question_type_field_alias() {
        let text = VALID.replace("type: true_false", "question_type: scoring");
        assert!(run(&text).is_empty());
    }

    #[test]
    fn test_question_without_type() {
        let text = VALID.replace("        type: true_false\n", "");
        let defects = run(&text);
        assert_eq!(defects.len(), 1);
        assert_eq!(
            defects[0].message,
            "domains.ai_security_standards.questions[1] missing 'type'"
        );
    }

    #[test]
    fn test_three_independent_defects_accumulate() {
        let text = VALID
            .replace("    weight: 0.5\n  operations:", "  operations:")
            .replace("    pillar: operations\n", "    pillar: nowhere\n")
            .replace("type: true_false", "type: essay");
        let defects = run(&text);
        let kinds: Vec<DefectKind> = defects.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                DefectKind::MissingField,
                DefectKind::InvalidEnumValue,
                DefectKind::DanglingReference,
            ]
        );
        assert_eq!(defects[0].message, "pillars.governance missing 'weight'");
    }

    #[test]
    fn test_optional_lists_type_checked() {
        let text = VALID
            .replace("    key_controls:\n      - Documented AI security policy\n", "    key_controls: Documented\n")
            .replace("    framework_alignment:\n      - NIST AI RMF GOVERN 1.1\n", "    framework_alignment: {nist: x}\n");
        let defects = run(&text);
        let messages: Vec<&str> = defects.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "domains.ai_security_standards.framework_alignment should be a list",
                "domains.ai_security_standards.key_controls should be a list",
            ]
        );
    }

    #[test]
    fn test_missing_top_level_keys() {
        let defects = run("pillars: {}\ndomains: {}\n");
        let messages: Vec<&str> = defects.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Missing required top-level key: 'version'",
                "Missing required top-level key: 'name'",
                "Missing required top-level key: 'description'",
                "Missing required top-level key: 'scoring_config'",
            ]
        );
    }

    #[test]
    fn test_scoring_config_fields() {
        let text = VALID.replace("  maturity_thresholds: {initial: 0, managed: 2.5}\n", "");
        let defects = run(&text);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].message, "scoring_config missing 'maturity_thresholds'");
    }

    #[test]
    fn test_domain_not_a_mapping_is_single_defect() {
        let text = VALID.replace(
            "  incident_response:\n    id: incident_response\n",
            "  incident_response: pending\n  _scratch:\n    id: incident_response\n",
        );
        let defects = run(&text);
        assert_eq!(defects[0].message, "domains.incident_response should be a mapping");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let text = VALID.replace("type: true_false", "type: essay");
        let doc = parse_document(&text, "doc.yaml").unwrap();
        assert_eq!(validate(&doc), validate(&doc));
    }

    #[test]
    fn test_levels_merged_from_anchor() {
        let text = VALID
            .replace(
                "    levels:\n      level_1: Ad hoc",
                "    levels: &standard_levels\n      level_1: Ad hoc",
            )
            .replace(
                "    levels:\n      level_1: a\n      level_2: b\n      level_3: c\n      level_4: d\n      level_5: e\n",
                "    levels:\n      <<: *standard_levels\n      level_5: Adaptive\n",
            );
        assert!(text.contains("<<: *standard_levels"));
        let defects = run(&text);
        assert!(defects.is_empty(), "unexpected defects: {:?}", defects);
    }
}
