//! Pre-pass that turns a document's markdown body into parseable outline YAML.
//!
//! Documents are written as nested bullet lists. The steps, in order:
//!
//! 1. trim the whole text
//! 2. `* ` bullets become `- `
//! 3. blank-line pairs collapse
//! 4. one stray trailing `\` (an empty markdown paragraph) is dropped
//! 5. empty lines are dropped
//! 6. a line followed by a deeper-indented line gets a trailing `:` so the
//!    YAML parser reads it as a parent key
//!
//! Step 6 compares only the indentation of adjacent lines. It knows nothing
//! about YAML and never looks further than the next line.

/// Normalises a document body into outline text.
///
/// # Example
///
/// ```
/// use outline_quiz::outline::normalize::normalize_outline;
///
/// let text = "* Cell\n\n  * Nucleus\n  * Ribosome\n";
/// assert_eq!(normalize_outline(text), "- Cell:\n  - Nucleus\n  - Ribosome");
/// ```
pub fn normalize_outline(raw: &str) -> String {
    let mut text = raw.trim().replace("* ", "- ").replace("\n\n", "\n");

    if text.ends_with('\\') {
        text.pop();
    }

    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        match lines.get(index + 1) {
            Some(next) if opens_block(line, next) => out.push(format!("{}:", line)),
            _ => out.push(line.to_string()),
        }
    }

    out.join("\n")
}

/// True when `next` is indented deeper than `line` and `line` is not already
/// a key.
fn opens_block(line: &str, next: &str) -> bool {
    indent_width(next) > indent_width(line) && !line.trim_end().ends_with(':')
}

/// Number of whitespace characters before the first visible one
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("- a"), 0);
        assert_eq!(indent_width("    - a"), 4);
        assert_eq!(indent_width("\t- a"), 1);
        assert_eq!(indent_width("   "), 3);
    }

    #[test]
    fn test_parent_lines_get_colon() {
        let raw = "- Chemistry\n  - Atom\n    - Nucleus\n  - Bond\n- Physics";
        assert_eq!(
            normalize_outline(raw),
            "- Chemistry:\n  - Atom:\n    - Nucleus\n  - Bond\n- Physics"
        );
    }

    #[test]
    fn test_star_bullets_and_blank_lines() {
        let raw = "\n\n* Cell\n\n\n\n  * Nucleus\n\n  * Ribosome\n\n";
        assert_eq!(normalize_outline(raw), "- Cell:\n  - Nucleus\n  - Ribosome");
    }

    #[test]
    fn test_trailing_backslash_dropped_once() {
        assert_eq!(normalize_outline("- a\n- b\n\\"), "- a\n- b");
        assert_eq!(normalize_outline("- a\\\\"), "- a\\");
    }

    #[test]
    fn test_existing_colon_not_doubled() {
        let raw = "- Mitochondria:\n  - Function";
        assert_eq!(normalize_outline(raw), "- Mitochondria:\n  - Function");
    }

    #[test]
    fn test_last_line_untouched() {
        assert_eq!(normalize_outline("- a\n  - b"), "- a:\n  - b");
        assert_eq!(normalize_outline("- only"), "- only");
    }

    #[test]
    fn test_shallower_or_equal_next_line_untouched() {
        let raw = "  - deep\n- shallow\n- same";
        assert_eq!(normalize_outline(raw), "- deep\n- shallow\n- same");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_outline("   \n\n  "), "");
    }

    #[test]
    fn test_normalized_text_parses() {
        use crate::quiz::concept::{parse_outline, Concept};

        let raw = "* Cell\n  * \\[Nucleus\\] holds DNA\n  * Membrane\n    * \\[Lipid bilayer\\] two layers\n";
        let concepts = parse_outline(&normalize_outline(raw)).unwrap();

        assert_eq!(
            concepts,
            vec![Concept::leaf("Cell").with_subconcepts(vec![
                Concept::leaf("Nucleus").with_description("holds DNA"),
                Concept::leaf("Membrane")
                    .with_subconcepts(vec![Concept::leaf("Lipid bilayer").with_description("two layers")]),
            ])]
        );
    }
}
