//! Depth-first flattening of concept trees.

use super::concept::Concept;

/// A concept together with the labels of its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatConcept {
    pub label: String,
    pub description: Option<String>,
    /// Labels of the immediate children, present iff the node is internal
    pub subconcepts: Option<Vec<String>>,
    pub valid_questions: Option<Vec<String>>,
    /// Ancestor labels from the root, excluding this node
    pub path: Vec<String>,
}

impl FlatConcept {
    /// True if the concept opted into the given extra question tag
    pub fn allows(&self, tag: &str) -> bool {
        self.valid_questions
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// Immediate parent label, if any
    pub fn parent(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

/// Flattens one concept tree in pre-order.
///
/// Internal nodes are always emitted, leaves only when they carry a
/// description.
pub fn flatten(concept: &Concept, path: &[String]) -> Vec<FlatConcept> {
    let mut out = Vec::new();
    flatten_into(concept, &mut path.to_vec(), &mut out);
    out
}

/// Flattens every top-level concept of a page, each from an empty path.
pub fn flatten_all(concepts: &[Concept]) -> Vec<FlatConcept> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    for concept in concepts {
        flatten_into(concept, &mut path, &mut out);
    }
    out
}

fn flatten_into(concept: &Concept, path: &mut Vec<String>, out: &mut Vec<FlatConcept>) {
    match &concept.subconcepts {
        Some(children) => {
            out.push(FlatConcept {
                label: concept.label.clone(),
                description: concept.description.clone(),
                subconcepts: Some(children.iter().map(|c| c.label.clone()).collect()),
                valid_questions: concept.valid_questions.clone(),
                path: path.clone(),
            });

            path.push(concept.label.clone());
            for child in children {
                flatten_into(child, path, out);
            }
            path.pop();
        }
        None if concept.description.is_some() => out.push(FlatConcept {
            label: concept.label.clone(),
            description: concept.description.clone(),
            subconcepts: None,
            valid_questions: concept.valid_questions.clone(),
            path: path.clone(),
        }),
        None => {}
    }
}
