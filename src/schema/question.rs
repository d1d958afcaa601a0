//! Assessment question types

use std::fmt;
use std::str::FromStr;

use crate::schema::defect::{DefectKind, Defects, Path};
use crate::yaml::Node;

/// Allowed values of a question's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Scoring,
    FreeText,
    Numeric,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::Scoring,
        QuestionType::FreeText,
        QuestionType::Numeric,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::Scoring => "scoring",
            QuestionType::FreeText => "free_text",
            QuestionType::Numeric => "numeric",
        }
    }

    fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check a question's type value, recording an invalid-enum defect
    pub fn check(value: &Node, question: &Path, defects: &mut Defects) -> Option<QuestionType> {
        let parsed = value.as_str().and_then(|s| s.parse().ok());
        if parsed.is_none() {
            let message = format!(
                "{} has unsupported type '{}' (expected one of: {})",
                question,
                value,
                Self::expected_list()
            );
            defects.push(question, DefectKind::InvalidEnumValue, message);
        }
        parsed
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown question type '{}'", s))
    }
}
