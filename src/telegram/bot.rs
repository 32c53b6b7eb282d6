//! Bot instance creation and question delivery

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;

use super::markdown::send_message_markdown_v2;
use super::message::{answer_keyboard, format_question, format_question_plain, FAILURE_NOTICE};
use crate::core::config::Config;
use crate::quiz::Question;

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config.http_timeout).build()?;
    let bot = Bot::with_client(config.bot_token.expose_secret(), client);

    let bot = match &config.bot_api_url {
        Some(url) => {
            log::info!("Using custom Bot API URL: {}", url);
            bot.set_api_url(url.clone())
        }
        None => bot,
    };

    Ok(bot)
}

/// Sends a formatted question with the answer keyboard
pub async fn send_question(bot: &Bot, chat_id: ChatId, question: &Question) -> ResponseResult<Message> {
    send_message_markdown_v2(
        bot,
        chat_id,
        format_question(question),
        format_question_plain(question),
        Some(answer_keyboard()),
    )
    .await
}

/// Tells the chat that no question could be built this time
pub async fn send_failure_notice(bot: &Bot, chat_id: ChatId) -> ResponseResult<Message> {
    bot.send_message(chat_id, FAILURE_NOTICE)
        .reply_markup(answer_keyboard())
        .await
}
