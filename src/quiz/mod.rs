//! Quiz generation: outline lines → concept tree → flat list → question

pub mod concept;
pub mod flatten;
pub mod label;
pub mod question;
pub mod service;

pub use concept::{parse_outline, Concept, ParseError};
pub use flatten::{flatten, flatten_all, FlatConcept};
pub use label::parse_label;
pub use question::{generate_question, Question, Template};
pub use service::{build_question, QuizService};
