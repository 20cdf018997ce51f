//! Alert records built from keyword matches.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Immutable record of a keyword hit. Created once per triggering message,
/// never mutated, discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub message_content: String,
    pub sender_uid: i64,
    pub sender_username: String,
    pub room_id: i64,
    pub timestamp: DateTime<Utc>,
    pub matched_keywords: Vec<String>,
}

/// Build an alert from an arbitrary JSON params object.
///
/// Total: wrong or missing field types coerce to deterministic fallbacks —
/// empty strings, `"unknown"` for the sender name, `0` for numbers, an
/// empty match list. The timestamp is always the current time.
pub fn build_alert(params: &Value) -> AlertRecord {
    AlertRecord {
        message_content: string_or(params.get("messageContent"), ""),
        sender_uid: params.get("senderUid").and_then(Value::as_i64).unwrap_or(0),
        sender_username: string_or(params.get("senderUsername"), "unknown"),
        room_id: params.get("roomId").and_then(Value::as_i64).unwrap_or(0),
        timestamp: Utc::now(),
        matched_keywords: params
            .get("matchedKeywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    value.and_then(Value::as_str).unwrap_or(fallback).to_string()
}
