//! Shared fixtures: a mocked document API and a mocked Bot API.

#![allow(dead_code)]

use std::collections::HashMap;

use outline_quiz::core::Config;
use outline_quiz::quiz::QuizService;
use outline_quiz::telegram::{create_bot, WebhookState};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const COLLECTION_ID: &str = "col-test";
pub const TEST_CHAT_ID: i64 = 123456789;

/// Everything a webhook test needs
pub struct TestEnvironment {
    pub outline: MockServer,
    pub telegram: MockServer,
    pub config: Config,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        Self::with_settings(&[]).await
    }

    /// Extra settings override the defaults (e.g. `QUIZ_FAILURE_NOTICE`).
    pub async fn with_settings(extra: &[(&str, &str)]) -> Self {
        let env = Self::without_bot_replies(extra).await;
        env.reply_to_send_message(ResponseTemplate::new(200).set_body_json(sent_message_response()))
            .await;
        env
    }

    /// Like [`Self::with_settings`], but the Bot API answers nothing until
    /// the test mounts its own replies.
    pub async fn without_bot_replies(extra: &[(&str, &str)]) -> Self {
        let outline = MockServer::start().await;
        let telegram = MockServer::start().await;

        let mut vars: HashMap<String, String> = HashMap::from([
            ("BOT_TOKEN".to_string(), "test_token_12345:ABCDEF".to_string()),
            ("BOT_API_URL".to_string(), telegram.uri()),
            ("OUTLINE_API_URL".to_string(), outline.uri()),
            ("OUTLINE_API_TOKEN".to_string(), "outline-token".to_string()),
            ("OUTLINE_COLLECTION_ID".to_string(), COLLECTION_ID.to_string()),
            ("HTTP_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config");

        Self {
            outline,
            telegram,
            config,
        }
    }

    /// Answers every later sendMessage call with `response`.
    pub async fn reply_to_send_message(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot[^/]+/sendmessage$"))
            .respond_with(response)
            .mount(&self.telegram)
            .await;
    }

    /// Answers only the next sendMessage call with `response`. Mount it
    /// before [`Self::reply_to_send_message`] so it takes precedence.
    pub async fn reply_once_to_send_message(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot[^/]+/sendmessage$"))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.telegram)
            .await;
    }

    pub fn state(&self) -> WebhookState {
        let quiz = QuizService::from_config(&self.config).expect("quiz service");
        let bot = create_bot(&self.config).expect("bot");
        WebhookState::new(quiz, bot, self.config.failure_notice)
    }

    /// Serves a collection holding the given documents as `(id, title, text)`.
    pub async fn mount_collection(&self, documents: &[(&str, &str, &str)]) {
        let refs: Vec<Value> = documents.iter().map(|(id, title, _)| json!({"id": id, "title": title})).collect();

        Mock::given(method("POST"))
            .and(path("/api/collections.info"))
            .and(body_json(json!({"id": COLLECTION_ID})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": COLLECTION_ID, "name": "Test", "documents": refs}
            })))
            .mount(&self.outline)
            .await;

        for (id, title, text) in documents {
            Mock::given(method("POST"))
                .and(path("/api/documents.info"))
                .and(body_json(json!({"id": id})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": {"id": id, "title": title, "text": text}
                })))
                .mount(&self.outline)
                .await;
        }
    }

    /// Bodies of every sendMessage call the bot made
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with("/sendmessage"))
            .map(request_json)
            .collect()
    }
}

/// Telegram update as delivered to the webhook
pub fn text_update(sender_id: i64, text: &str) -> Value {
    json!({
        "update_id": 1001,
        "message": {
            "message_id": 7,
            "date": 1_700_000_000,
            "chat": {"id": sender_id, "type": "private", "first_name": "Test"},
            "from": {"id": sender_id, "is_bot": false, "first_name": "Test"},
            "text": text
        }
    })
}

fn request_json(req: &Request) -> Value {
    serde_json::from_slice(&req.body).unwrap_or(Value::Null)
}

/// Bot API error body with the given description
pub fn bot_api_error(description: &str) -> Value {
    json!({"ok": false, "error_code": 400, "description": description})
}

pub fn sent_message_response() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 8,
            "date": 1_700_000_001,
            "chat": {"id": TEST_CHAT_ID, "type": "private", "first_name": "Test"},
            "text": "ok"
        }
    })
}
