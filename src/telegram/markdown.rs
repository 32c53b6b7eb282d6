use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyMarkup};
use teloxide::RequestError;

/// Escapes the characters MarkdownV2 treats as markup.
///
/// In Telegram MarkdownV2 the following characters must be escaped:
/// `_`, `*`, `[`, `]`, `(`, `)`, `~`, `` ` ``, `>`, `#`, `+`, `-`, `=`, `|`, `{`, `}`, `.`, `!`
/// plus the backslash itself.
///
/// # Example
///
/// ```
/// use outline_quiz::telegram::markdown::escape_markdown_v2;
///
/// let escaped = escape_markdown_v2("Hello. World!");
/// assert_eq!(escaped, "Hello\\. World\\!");
/// ```
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}'
            | '.' | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Escapes text placed inside a ```` ``` ```` block, where only `` ` `` and `\`
/// are special.
pub fn escape_code_block(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);

    for c in text.chars() {
        if c == '\\' || c == '`' {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

fn is_markdown_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

/// Sends a MarkdownV2 message, resending `plain` without formatting if
/// Telegram rejects the markup.
pub async fn send_message_markdown_v2(
    bot: &Bot,
    chat_id: ChatId,
    markdown: String,
    plain: String,
    keyboard: Option<ReplyMarkup>,
) -> ResponseResult<Message> {
    let mut req = bot.send_message(chat_id, markdown).parse_mode(ParseMode::MarkdownV2);
    if let Some(kb) = keyboard.clone() {
        req = req.reply_markup(kb);
    }

    match req.await {
        Ok(msg) => Ok(msg),
        Err(e) if is_markdown_parse_error(&e) => {
            log::warn!("Telegram rejected MarkdownV2 for chat {}: {}; resending as plain text", chat_id, e);
            let mut retry = bot.send_message(chat_id, plain);
            if let Some(kb) = keyboard {
                retry = retry.reply_markup(kb);
            }
            retry.await
        }
        Err(e) => Err(e),
    }
}
