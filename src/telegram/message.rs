//! Chat rendering of a [`Question`].
//!
//! ~~~text
//! Q) <prompt>
//! ```
//! <additional info>
//! ```
//! A) ||<answer>||
//!
//! 범위: <title> > <ancestor> > ...
//! ~~~

use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

use super::markdown::{escape_code_block, escape_markdown_v2};
use crate::quiz::Question;

/// Prefix of the scope line
pub const SCOPE_PREFIX: &str = "범위: ";

/// Buttons offered under every question
pub const KEYBOARD_LABELS: [&str; 2] = ["👍", "👎"];

/// Sent instead of a question when none could be built
pub const FAILURE_NOTICE: &str = "문제를 만들지 못했어요. 잠시 후 다시 시도해주세요.";

/// MarkdownV2 message text for a question.
pub fn format_question(question: &Question) -> String {
    let mut lines = vec![format!("Q\\) {}", escape_markdown_v2(&question.text))];

    if let Some(info) = additional_info(question) {
        lines.push(format!("```\n{}\n```", escape_code_block(info)));
    }

    lines.push(format!("A\\) ||{}||", escape_markdown_v2(&question.answer)));

    let scope: Vec<String> = question.breadcrumb().iter().map(|s| escape_markdown_v2(s)).collect();
    if !scope.is_empty() {
        lines.push(format!("\n{}{}", SCOPE_PREFIX, scope.join(" \\> ")));
    }

    lines.join("\n")
}

/// Unformatted variant, used when Telegram rejects the markup.
pub fn format_question_plain(question: &Question) -> String {
    let mut lines = vec![format!("Q) {}", question.text)];

    if let Some(info) = additional_info(question) {
        lines.push(info.to_string());
    }

    lines.push(format!("A) {}", question.answer));

    let scope = question.breadcrumb();
    if !scope.is_empty() {
        lines.push(format!("\n{}{}", SCOPE_PREFIX, scope.join(" > ")));
    }

    lines.join("\n")
}

/// Two-button reply keyboard
pub fn answer_keyboard() -> ReplyMarkup {
    let row: Vec<KeyboardButton> = KEYBOARD_LABELS.iter().map(|label| KeyboardButton::new(*label)).collect();
    ReplyMarkup::Keyboard(KeyboardMarkup::new(vec![row]))
}

fn additional_info(question: &Question) -> Option<&str> {
    question.additional_info.as_deref().filter(|info| !info.is_empty())
}
