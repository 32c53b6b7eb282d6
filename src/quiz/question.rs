//! Question templates and the random question generator.
//!
//! Randomness always comes in as a `&mut impl Rng`, so tests can pass a
//! seeded `StdRng` and production passes an entropy-seeded one.

use rand::seq::SliceRandom;
use rand::Rng;

use super::flatten::FlatConcept;

/// Label prefix meaning "attribute of the parent concept"
pub const MARKER: char = '#';

/// Header tag that opts a concept into the ordering question
pub const ORDERING_TAG: &str = "순서";

/// Answer used when a concept has neither description nor children
pub const NO_DESCRIPTION: &str = "설명이 없습니다";

/// A way of turning a concept into a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Explain the concept; always available
    Definition,
    /// Name the concept from its description
    Description,
    /// Put the children back in order; opt-in via the `순서` tag
    SequenceOrdering,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Definition, Template::Description, Template::SequenceOrdering];

    pub fn is_eligible(self, concept: &FlatConcept) -> bool {
        match self {
            Template::Definition => true,
            Template::Description => concept.description.as_deref().is_some_and(|d| !d.is_empty()),
            Template::SequenceOrdering => concept.subconcepts.is_some() && concept.allows(ORDERING_TAG),
        }
    }

    /// Renders the prompt/answer pair, or `None` when the concept lacks the
    /// data this template needs.
    pub fn render<R: Rng + ?Sized>(self, concept: &FlatConcept, rng: &mut R) -> Option<Prompt> {
        match self {
            Template::Definition => Some(Prompt {
                text: format!("\"{}\"의 의미를 설명해주세요", display_label(&concept.label, &concept.path)),
                additional_info: None,
                answer: concept
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .or_else(|| concept.subconcepts.as_ref().map(|c| c.join(", ")).filter(|a| !a.is_empty()))
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            }),
            Template::Description => {
                let description = concept.description.as_ref()?;
                let mut text = "다음 설명에 해당하는 개념은 무엇일까요?".to_string();
                if let Some(parent) = concept.parent().filter(|_| !is_marker_label(&concept.label)) {
                    text.push_str(&format!(" ({})", parent));
                }
                Some(Prompt {
                    text,
                    additional_info: Some(description.clone()),
                    answer: display_label(&concept.label, &concept.path),
                })
            }
            Template::SequenceOrdering => {
                let children = concept.subconcepts.as_ref()?;
                let mut shuffled = children.clone();
                shuffled.shuffle(rng);
                Some(Prompt {
                    text: "다음 개념들을 올바른 순서로 정렬해주세요".to_string(),
                    additional_info: Some(shuffled.join(", ")),
                    answer: children.join(", "),
                })
            }
        }
    }
}

/// Rendered template output, before page context is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub additional_info: Option<String>,
    pub answer: String,
}

/// A question ready to be formatted for the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub additional_info: Option<String>,
    pub answer: String,
    /// Page title followed by the concept's ancestor labels
    pub path: Vec<String>,
    /// Raw label of the sampled concept
    pub label: String,
    pub template: Template,
}

impl Question {
    /// Breadcrumb segments to show; the last one is dropped for marker labels
    /// since the prompt already names the parent.
    pub fn breadcrumb(&self) -> &[String] {
        if is_marker_label(&self.label) && !self.path.is_empty() {
            &self.path[..self.path.len() - 1]
        } else {
            &self.path
        }
    }
}

pub fn is_marker_label(label: &str) -> bool {
    label.starts_with(MARKER)
}

/// Label as shown to the reader.
///
/// `#inventor` under `Atom` reads as `Atom의 inventor`.
pub fn display_label(label: &str, path: &[String]) -> String {
    match label.strip_prefix(MARKER) {
        Some(rest) => match path.last() {
            Some(parent) => format!("{}의 {}", parent, rest.trim()),
            None => rest.trim().to_string(),
        },
        None => label.to_string(),
    }
}

/// Templates that can be used for this concept, in declaration order
pub fn eligible_templates(concept: &FlatConcept) -> Vec<Template> {
    Template::ALL.into_iter().filter(|t| t.is_eligible(concept)).collect()
}

/// Samples a concept and a template and renders the question.
///
/// Returns `None` only when `concepts` is empty.
pub fn generate_question<R: Rng + ?Sized>(page_title: &str, concepts: &[FlatConcept], rng: &mut R) -> Option<Question> {
    let concept = concepts.choose(rng)?;
    let templates = eligible_templates(concept);
    let template = *templates.choose(rng).unwrap_or(&Template::Definition);

    // Definition always renders, so it backs up a template that declined.
    let (template, prompt) = match template.render(concept, rng) {
        Some(prompt) => (template, prompt),
        None => (Template::Definition, Template::Definition.render(concept, rng)?),
    };

    let mut path = Vec::with_capacity(concept.path.len() + 1);
    path.push(page_title.to_string());
    path.extend(concept.path.iter().cloned());

    Some(Question {
        text: prompt.text,
        additional_info: prompt.additional_info,
        answer: prompt.answer,
        path,
        label: concept.label.clone(),
        template,
    })
}
