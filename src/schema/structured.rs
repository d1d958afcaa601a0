//! Rules for the structured (v2.x) layout
//!
//! Everything lives under the `aismm` wrapper: a `components` list, each
//! component holding a `domains` list, plus a single
//! `assessment_questionnaire`. Defect paths are reported relative to the
//! wrapper, e.g. `components[2].domains[1].maturity_levels`.

use std::collections::BTreeSet;

use crate::schema::defect::{Defect, DefectKind, Defects, Path};
use crate::schema::question::QuestionType;
use crate::schema::shape::WRAPPER_KEY;
use crate::yaml::Node;

const COMPONENT_FIELDS: [&str; 3] = ["id", "id_code", "domains"];
const DOMAIN_FIELDS: [&str; 3] = ["id", "id_code", "maturity_levels"];
const QUESTION_FIELDS: [&str; 5] = ["id", "type", "title", "help_text", "required"];

/// Maturity levels every domain must define
pub const LEVELS: std::ops::RangeInclusive<i64> = 1..=5;

/// Validate a structured document, returning defects in discovery order
pub fn validate(doc: &Node) -> Vec<Defect> {
    let mut defects = Defects::new();
    let wrapper_path = Path::root().key(WRAPPER_KEY);

    let Some(wrapper) = doc.get(WRAPPER_KEY) else {
        defects.missing(&Path::root(), WRAPPER_KEY);
        return defects.into_vec();
    };
    if defects.expect_mapping(wrapper, &wrapper_path).is_none() {
        return defects.into_vec();
    }

    match wrapper.get("components") {
        Some(components) => check_components(components, &mut defects),
        None => defects.missing(&wrapper_path, "components"),
    }
    match wrapper.get("assessment_questionnaire") {
        Some(questionnaire) => check_questionnaire(questionnaire, &mut defects),
        None => defects.missing(&wrapper_path, "assessment_questionnaire"),
    }

    tracing::debug!(defects = defects.len(), "structured rules finished");
    defects.into_vec()
}

fn check_components(components: &Node, defects: &mut Defects) {
    let path = Path::root().key("components");
    let Some(items) = defects.expect_sequence(components, &path) else {
        return;
    };

    tracing::debug!(count = items.len(), "checking components");

    for (ci, component) in items.iter().enumerate() {
        let component_path = path.index(ci + 1);
        if defects.expect_mapping(component, &component_path).is_none() {
            continue;
        }
        defects.require_fields(component, &component_path, &COMPONENT_FIELDS);

        let Some(domains) = defects.optional_sequence(component, &component_path, "domains") else {
            continue;
        };
        let domains_path = component_path.key("domains");
        for (di, domain) in domains.iter().enumerate() {
            check_domain(domain, &domains_path.index(di + 1), defects);
        }
    }
}

fn check_domain(domain: &Node, path: &Path, defects: &mut Defects) {
    if defects.expect_mapping(domain, path).is_none() {
        return;
    }
    defects.require_fields(domain, path, &DOMAIN_FIELDS);

    if let Some(mappings) = domain.get("mappings") {
        let mappings_path = path.key("mappings");
        if let Some(frameworks) = defects.expect_mapping(mappings, &mappings_path) {
            for (framework, refs) in frameworks {
                defects.expect_sequence(refs, &mappings_path.key(framework));
            }
        }
    }

    if let Some(levels) = domain.get("maturity_levels") {
        check_maturity_levels(levels, &path.key("maturity_levels"), defects);
    }
}

/// Compare the declared `level` values against 1..=5
///
/// The set comparison only runs when every entry yielded an integer level;
/// a malformed entry is reported on its own instead.
fn check_maturity_levels(levels: &Node, path: &Path, defects: &mut Defects) {
    let Some(items) = defects.expect_sequence(levels, path) else {
        return;
    };

    let mut values = Vec::with_capacity(items.len());
    let mut well_formed = true;
    for (i, item) in items.iter().enumerate() {
        let item_path = path.index(i + 1);
        if defects.expect_mapping(item, &item_path).is_none() {
            well_formed = false;
            continue;
        }
        match item.get("level") {
            Some(Node::Integer(level)) => values.push(*level),
            Some(other) => {
                well_formed = false;
                let message = format!("{} has non-integer level '{}'", item_path, other);
                defects.push(&item_path, DefectKind::InvalidLevel, message);
            }
            None => {
                well_formed = false;
                defects.missing(&item_path, "level");
            }
        }
    }
    if !well_formed {
        return;
    }

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for value in &values {
        if !seen.insert(*value) {
            duplicates.insert(*value);
        }
    }

    let missing: Vec<String> = LEVELS
        .filter(|level| !seen.contains(level))
        .map(|level| level.to_string())
        .collect();
    let unexpected: Vec<String> = seen
        .iter()
        .filter(|level| !LEVELS.contains(*level))
        .map(|level| level.to_string())
        .collect();

    if !missing.is_empty() {
        let message = format!("{} missing levels: {}", path, missing.join(", "));
        defects.push(path, DefectKind::MissingLevels, message);
    }
    if !unexpected.is_empty() {
        let message = format!("{} has unexpected levels: {}", path, unexpected.join(", "));
        defects.push(path, DefectKind::UnexpectedLevels, message);
    }
    for level in duplicates {
        let message = format!("{} has duplicate level: {}", path, level);
        defects.push(path, DefectKind::DuplicateLevel, message);
    }
}

fn check_questionnaire(questionnaire: &Node, defects: &mut Defects) {
    let path = Path::root().key("assessment_questionnaire");
    if defects.expect_mapping(questionnaire, &path).is_none() {
        return;
    }
    let Some(questions) = questionnaire.get("questions") else {
        defects.missing(&path, "questions");
        return;
    };

    let questions_path = path.key("questions");
    let Some(items) = defects.expect_sequence(questions, &questions_path) else {
        return;
    };

    tracing::debug!(count = items.len(), "checking questionnaire");

    for (qi, question) in items.iter().enumerate() {
        let question_path = questions_path.index(qi + 1);
        if defects.expect_mapping(question, &question_path).is_none() {
            continue;
        }
        defects.require_fields(question, &question_path, &QUESTION_FIELDS);
        if let Some(kind) = question.get("type") {
            QuestionType::check(kind, &question_path, defects);
        }
    }
}
