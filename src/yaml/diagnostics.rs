//! YAML error diagnostics with source-annotated messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("failed to parse YAML: {message}")]
#[diagnostic(code(aismm::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// The underlying parser message
    message: String,
}

impl YamlSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    /// The parser's own message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Horizontal tabs found in a YAML document
#[derive(Debug, Error, Diagnostic)]
#[error("YAML file contains tab characters on line(s): {}", join_lines(.lines))]
#[diagnostic(
    code(aismm::yaml::tabs),
    help("YAML must use spaces for indentation. Replace tabs with spaces and re-run validation.")
)]
pub struct TabCharacterError {
    #[source_code]
    src: NamedSource<String>,

    #[label("tab character")]
    first: SourceSpan,

    /// Sorted 1-based line numbers
    lines: Vec<usize>,
}

impl TabCharacterError {
    /// Scan `source` for tabs; `None` when the text is clean
    pub fn scan(source: &str, filename: &str) -> Option<Self> {
        let first = source.find('\t')?;
        let lines = tab_lines(source);

        Some(Self {
            src: NamedSource::new(filename, source.to_string()),
            first: SourceSpan::from(first..first + 1),
            lines,
        })
    }

    /// Offending line numbers, 1-based and ascending
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }
}

/// 1-based lines holding a tab. `\n`, `\r\n` and a lone `\r` all end a line.
fn tab_lines(source: &str) -> Vec<usize> {
    let mut lines = Vec::new();
    let mut line = 1;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\t' if lines.last() != Some(&line) => lines.push(line),
            '\n' => line += 1,
            '\r' if chars.peek() != Some(&'\n') => line += 1,
            _ => {}
        }
    }
    lines
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert line/column to byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut current_line = 1;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            let line_start = i;
            let mut col = 1;
            for (j, c) in source[line_start..].char_indices() {
                if col == column {
                    return line_start + j;
                }
                if c == '\n' {
                    break;
                }
                col += 1;
            }
            return line_start + column.saturating_sub(1);
        }
        if ch == '\n' {
            current_line += 1;
        }
        offset = i;
    }

    offset
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("duplicate") && msg_lower.contains("key") {
        return Some("Each key can only appear once. Remove or rename the duplicate key.".to_string());
    }

    if msg_lower.contains("expected block end") || msg_lower.contains("did not find expected key") {
        return Some("Check your indentation - it may be inconsistent.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg_lower.contains("found unexpected ':'") {
        return Some("Colons in values need to be quoted: \"value:with:colons\"".to_string());
    }

    if msg_lower.contains("did not find expected ',' or ']'") {
        return Some("Add commas between list items: [item1, item2, item3]".to_string());
    }

    if msg_lower.contains("@") || msg_lower.contains("reserved indicator") {
        return Some("Special characters like @ and ` need to be quoted: \"@value\"".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 1), 12);
    }

    #[test]
    fn test_help_generation() {
        assert!(generate_help("duplicate entry with key \"id\"").is_some());
        assert!(generate_help("mapping values are not allowed in this context").is_some());
        assert!(generate_help("some random error").is_none());
    }

    #[test]
    fn test_tab_scan_clean_text() {
        assert!(TabCharacterError::scan("a: 1\nb: 2\n", "doc.yaml").is_none());
    }

    #[test]
    fn test_tab_scan_reports_sorted_lines() {
        let err = TabCharacterError::scan("a: 1\n\tb: 2\nc: 3\nd:\t4\n", "doc.yaml").unwrap();
        assert_eq!(err.lines(), &[2, 4]);
        assert!(err.to_string().contains("line(s): 2, 4"));
    }

    #[test]
    fn test_tab_scan_counts_carriage_returns() {
        let err = TabCharacterError::scan("a: 1\rb:\t2\r", "doc.yaml").unwrap();
        assert_eq!(err.lines(), &[2]);

        let err = TabCharacterError::scan("a: 1\r\nb: 2\r\nc:\t\t3\r\n", "doc.yaml").unwrap();
        assert_eq!(err.lines(), &[3]);
    }
}
