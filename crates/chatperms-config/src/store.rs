//! Storage-string codec for the settings namespace.
//!
//! The host store holds strings only. Arrays go in as JSON text, booleans
//! as `"true"`/`"false"`, numbers as decimal strings; the resolver decodes
//! them on the way back out.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::EffectiveSettings;

/// Store/admin field keys — the camelCase admin-surface namespace.
pub mod field {
    pub const ADMIN_UIDS: &str = "adminUids";
    pub const ALLOW_CHAT_GROUP: &str = "allowChatGroup";
    pub const DENY_CHAT_GROUP: &str = "denyChatGroup";
    pub const MIN_REPUTATION: &str = "minReputation";
    pub const MIN_POSTS: &str = "minPosts";
    pub const CHAT_NOT_YET_ALLOWED_MESSAGE: &str = "chatNotYetAllowedMessage";
    pub const CHAT_DENIED_MESSAGE: &str = "chatDeniedMessage";
    pub const WARNING_ENABLED: &str = "warningEnabled";
    pub const WARNING_MESSAGE: &str = "warningMessage";
    pub const WARNING_DISPLAY_TYPE: &str = "warningDisplayType";
    pub const KEYWORD_ALERTS_ENABLED: &str = "keywordAlertsEnabled";
    pub const KEYWORD_LIST: &str = "keywordList";
    pub const ALERT_RECIPIENT_UIDS: &str = "alertRecipientUids";

    /// Every known key.
    pub const ALL: &[&str] = &[
        ADMIN_UIDS,
        ALLOW_CHAT_GROUP,
        DENY_CHAT_GROUP,
        MIN_REPUTATION,
        MIN_POSTS,
        CHAT_NOT_YET_ALLOWED_MESSAGE,
        CHAT_DENIED_MESSAGE,
        WARNING_ENABLED,
        WARNING_MESSAGE,
        WARNING_DISPLAY_TYPE,
        KEYWORD_ALERTS_ENABLED,
        KEYWORD_LIST,
        ALERT_RECIPIENT_UIDS,
    ];

    /// Boolean fields skip the non-empty filter when read from the store.
    pub fn is_boolean(key: &str) -> bool {
        key == WARNING_ENABLED || key == KEYWORD_ALERTS_ENABLED
    }
}

/// String-encode a partial settings mapping for the store.
///
/// Unknown keys and unencodable values (null, nested objects) are skipped.
pub fn encode_for_store(partial: &Map<String, Value>) -> HashMap<String, String> {
    let mut encoded = HashMap::new();
    for key in field::ALL {
        let Some(value) = partial.get(*key) else {
            continue;
        };
        let text = match value {
            Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            Value::Null | Value::Object(_) => continue,
        };
        encoded.insert((*key).to_string(), text);
    }
    encoded
}

/// Encode a full settings object. Encoding then resolving from a store
/// seeded with the result yields the same settings back.
pub fn encode_settings(settings: &EffectiveSettings) -> HashMap<String, String> {
    match serde_json::to_value(settings) {
        Ok(Value::Object(map)) => encode_for_store(&map),
        _ => HashMap::new(),
    }
}
