//! Effective-settings resolution: defaults → store → environment.

use crate::store::field;
use crate::{EffectiveSettings, SETTINGS_ENV_VAR, SETTINGS_NAMESPACE};
use chatperms_host::SettingsStore;
use chatperms_types::DisplayType;
use serde_json::{Map, Value};

/// Resolve the effective settings from all layers.
///
/// Store keys apply only when present and, for non-boolean fields,
/// non-empty; environment overrides apply whenever the field is present,
/// regardless of emptiness. Type coercion runs after the layers merge.
/// A store read failure is logged and treated as an empty layer.
pub async fn resolve(store: &dyn SettingsStore) -> EffectiveSettings {
    resolve_with_env(store, env_overrides()).await
}

pub(crate) async fn resolve_with_env(
    store: &dyn SettingsStore,
    overrides: Option<Map<String, Value>>,
) -> EffectiveSettings {
    let mut raw: Map<String, Value> = Map::new();

    match store.get(SETTINGS_NAMESPACE).await {
        Ok(values) => {
            for key in field::ALL {
                if let Some(value) = values.get(*key) {
                    if field::is_boolean(key) || !value.is_empty() {
                        raw.insert((*key).to_string(), Value::String(value.clone()));
                    }
                }
            }
        }
        Err(err) => {
            tracing::warn!("settings store read failed, falling back to defaults: {err}");
        }
    }

    if let Some(overrides) = overrides {
        for key in field::ALL {
            if let Some(value) = overrides.get(*key) {
                raw.insert((*key).to_string(), value.clone());
            }
        }
    }

    coerce(&raw)
}

fn env_overrides() -> Option<Map<String, Value>> {
    let text = std::env::var(SETTINGS_ENV_VAR).ok()?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => {
            tracing::warn!("ignoring malformed {SETTINGS_ENV_VAR} override");
            None
        }
    }
}

fn coerce(raw: &Map<String, Value>) -> EffectiveSettings {
    let defaults = EffectiveSettings::default();
    EffectiveSettings {
        admin_uids: uid_list(raw.get(field::ADMIN_UIDS)).unwrap_or(defaults.admin_uids),
        allow_chat_group: string_field(raw.get(field::ALLOW_CHAT_GROUP), defaults.allow_chat_group),
        deny_chat_group: string_field(raw.get(field::DENY_CHAT_GROUP), defaults.deny_chat_group),
        min_reputation: non_negative(raw.get(field::MIN_REPUTATION), defaults.min_reputation),
        min_posts: non_negative(raw.get(field::MIN_POSTS), defaults.min_posts),
        chat_not_yet_allowed_message: string_field(
            raw.get(field::CHAT_NOT_YET_ALLOWED_MESSAGE),
            defaults.chat_not_yet_allowed_message,
        ),
        chat_denied_message: string_field(
            raw.get(field::CHAT_DENIED_MESSAGE),
            defaults.chat_denied_message,
        ),
        warning_enabled: boolean(raw.get(field::WARNING_ENABLED)),
        warning_message: string_field(raw.get(field::WARNING_MESSAGE), defaults.warning_message),
        warning_display_type: display_type(raw.get(field::WARNING_DISPLAY_TYPE)),
        keyword_alerts_enabled: boolean(raw.get(field::KEYWORD_ALERTS_ENABLED)),
        keyword_list: keyword_list(raw.get(field::KEYWORD_LIST)).unwrap_or(defaults.keyword_list),
        alert_recipient_uids: uid_list(raw.get(field::ALERT_RECIPIENT_UIDS))
            .unwrap_or(defaults.alert_recipient_uids),
    }
}

/// `true`/`"true"`/`"on"` → true, anything else → false.
fn boolean(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text == "true" || text == "on",
        _ => false,
    }
}

fn string_field(value: Option<&Value>, default: String) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        _ => default,
    }
}

/// Integers ≥ 0; anything else falls back to the default.
fn non_negative(value: Option<&Value>, default: i64) -> i64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n >= 0 => n,
        _ => default,
    }
}

fn display_type(value: Option<&Value>) -> DisplayType {
    value
        .and_then(Value::as_str)
        .and_then(DisplayType::parse)
        .unwrap_or_default()
}

/// Uid lists accept a native array, JSON array text, or comma-separated
/// text. Non-numeric entries are dropped.
fn uid_list(value: Option<&Value>) -> Option<Vec<i64>> {
    match value? {
        Value::Array(items) => Some(items.iter().filter_map(Value::as_i64).collect()),
        Value::String(text) => Some(parse_uid_text(text)),
        _ => None,
    }
}

fn parse_uid_text(text: &str) -> Vec<i64> {
    if let Ok(Value::Array(items)) = serde_json::from_str(text) {
        return items.iter().filter_map(Value::as_i64).collect();
    }
    text.split(',')
        .filter_map(|item| item.trim().parse::<i64>().ok())
        .collect()
}

/// Keyword lists accept a native array, JSON array text, or
/// newline-separated text. Entries are trimmed, lowercased, and dropped
/// when empty.
fn keyword_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = match value? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(text) => parse_keyword_text(text),
        _ => return None,
    };
    Some(
        items
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect(),
    )
}

fn parse_keyword_text(text: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str(text) {
        return items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }
    text.split('\n').map(str::to_string).collect()
}
