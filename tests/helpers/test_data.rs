//! Test data helpers for creating test objects
//!
//! Telegram types are built from their JSON form, the same way they arrive
//! over the webhook.

use serde_json::{json, Value};
use teloxide::types::{Me, Message, Update};

use super::telegram_mock::{test_chat_id, test_user_id};

/// JSON of the private-chat user sending test messages
pub fn test_user_json() -> Value {
    json!({
        "id": test_user_id(),
        "is_bot": false,
        "first_name": "Анна",
        "last_name": "<Иванова>",
        "username": "anna_reads",
        "language_code": "ru"
    })
}

/// JSON of a private-chat message with the given extra fields
pub fn message_json(message_id: i32, extra: Value) -> Value {
    let mut message = json!({
        "message_id": message_id,
        "date": 1700000000,
        "chat": {
            "id": test_chat_id(),
            "type": "private",
            "first_name": "Анна",
            "username": "anna_reads"
        },
        "from": test_user_json()
    });

    if let (Some(target), Some(fields)) = (message.as_object_mut(), extra.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    message
}

/// Text message as JSON
pub fn text_message_json(text: &str) -> Value {
    message_json(1, json!({ "text": text }))
}

/// Message carrying data sent from the mini-app
pub fn web_app_data_message_json(data: &str) -> Value {
    message_json(2, json!({
        "web_app_data": { "data": data, "button_text": "📚 Открыть Bookly" }
    }))
}

/// Helper function to create a test Telegram message
pub fn create_test_message(text: &str) -> Message {
    serde_json::from_value(text_message_json(text)).expect("valid message json")
}

/// Wrap a message JSON into an update JSON
pub fn update_json(update_id: i32, message: Value) -> Value {
    json!({ "update_id": update_id, "message": message })
}

pub fn create_test_update(text: &str) -> Update {
    serde_json::from_value(update_json(1, text_message_json(text))).expect("valid update json")
}

/// The bot's own account, as returned by getMe
pub fn test_me() -> Me {
    serde_json::from_value(json!({
        "id": 12345,
        "is_bot": true,
        "first_name": "Bookly",
        "username": "bookly_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    }))
    .expect("valid me json")
}
