//! Concept tree construction from outline YAML.
//!
//! The normalised outline text is a YAML sequence whose items are either plain
//! lines or single-entry mappings `line: children`. Every line goes through
//! [`parse_label`]; mappings become internal nodes.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::label::{parse_label, ParsedLabel};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("outline is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("outline root must be a list of concepts")]
    NotASequence,
    #[error("concept mapping has no entries")]
    EmptyMapping,
    #[error("unexpected {0} where a concept line or mapping was expected")]
    UnexpectedNode(&'static str),
    #[error("concept line {0:?} has an empty label")]
    EmptyLabel(String),
}

/// A node of the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub label: String,
    pub description: Option<String>,
    /// Present iff this is an internal node
    pub subconcepts: Option<Vec<Concept>>,
    pub valid_questions: Option<Vec<String>>,
}

impl Concept {
    /// Leaf concept with only a label
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            subconcepts: None,
            valid_questions: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_subconcepts(mut self, subconcepts: Vec<Concept>) -> Self {
        self.subconcepts = Some(subconcepts);
        self
    }

    pub fn with_valid_questions<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_questions = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl From<ParsedLabel> for Concept {
    fn from(parsed: ParsedLabel) -> Self {
        Self {
            label: parsed.label,
            description: parsed.description,
            subconcepts: None,
            valid_questions: parsed.valid_questions,
        }
    }
}

/// Parses normalised outline text into its top-level concepts.
///
/// An empty document yields no concepts; the caller decides whether that is
/// an error.
pub fn parse_outline(text: &str) -> Result<Vec<Concept>, ParseError> {
    let root: Value = serde_yaml::from_str(text)?;

    match root {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.iter().map(build_concept).collect(),
        _ => Err(ParseError::NotASequence),
    }
}

/// Builds a concept (and its subtree) from one YAML node.
pub fn build_concept(node: &Value) -> Result<Concept, ParseError> {
    match node {
        Value::String(line) => concept_from_line(line),
        Value::Mapping(mapping) => build_internal(mapping),
        other => Err(ParseError::UnexpectedNode(kind_of(other))),
    }
}

fn build_internal(mapping: &Mapping) -> Result<Concept, ParseError> {
    let mut entries = mapping.iter();
    let (key, value) = entries.next().ok_or(ParseError::EmptyMapping)?;

    let line = key_text(key)?;

    let ignored = entries.count();
    if ignored > 0 {
        log::warn!("Concept {:?} shares its mapping with {} more key(s); ignoring them", line, ignored);
    }

    let children = match value {
        Value::Sequence(items) => items.iter().map(build_concept).collect::<Result<Vec<_>, _>>()?,
        single => vec![build_concept(single)?],
    };

    Ok(concept_from_line(&line)?.with_subconcepts(children))
}

/// Outline text of a parent line. YAML reads `- 1945:` with a numeric key,
/// which is still an ordinary label.
fn key_text(key: &Value) -> Result<String, ParseError> {
    match key {
        Value::String(line) => Ok(line.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(ParseError::UnexpectedNode(kind_of(other))),
    }
}

fn concept_from_line(line: &str) -> Result<Concept, ParseError> {
    let parsed = parse_label(line);
    if parsed.label.trim().is_empty() {
        return Err(ParseError::EmptyLabel(line.to_string()));
    }
    Ok(parsed.into())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "empty value",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
