//! Outline line parser
//!
//! A line is either a bare label or carries a bracketed header:
//!
//! ```text
//! [Photosynthesis|순서] Process by which plants...
//! ```
//!
//! Only the first `[` ... `]` pair is the header. Inside it, the part before
//! `|` is the label and the part after is a comma-separated tag list. Whatever
//! follows the first `]` is the description.
//!
//! Text written in front of the header (`Photosynthesis [Bio|순서] ...`) names
//! the concept and takes precedence over the header's own label.

/// Result of parsing a single outline line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLabel {
    pub label: String,
    pub description: Option<String>,
    pub valid_questions: Option<Vec<String>>,
}

/// Parses one raw outline line.
///
/// Backslashes are stripped first (the document API escapes markdown).
///
/// # Example
///
/// ```
/// use outline_quiz::quiz::label::parse_label;
///
/// let parsed = parse_label("[Photosynthesis|순서] Process by which plants...");
/// assert_eq!(parsed.label, "Photosynthesis");
/// assert_eq!(parsed.valid_questions, Some(vec!["순서".to_string()]));
/// assert_eq!(parsed.description.as_deref(), Some("Process by which plants..."));
/// ```
pub fn parse_label(raw: &str) -> ParsedLabel {
    let sanitized = raw.replace('\\', "");

    let Some(open) = sanitized.find('[') else {
        return ParsedLabel {
            label: sanitized,
            ..ParsedLabel::default()
        };
    };

    let after_open = &sanitized[open + 1..];
    let (header, rest) = match after_open.find(']') {
        Some(close) => (&after_open[..close], Some(&after_open[close + 1..])),
        None => (after_open, None),
    };

    let (header_label, valid_questions) = match header.split_once('|') {
        Some((label, tags)) => (label, Some(parse_tags(tags))),
        None => (header, None),
    };

    let prefix = sanitized[..open].trim();
    let label = if prefix.is_empty() { header_label } else { prefix };

    let description = rest.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string);

    ParsedLabel {
        label: label.trim().to_string(),
        description,
        valid_questions,
    }
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
