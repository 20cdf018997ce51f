//! Layered settings for chatperms.
//!
//! Effective configuration is resolved from three layers in ascending
//! precedence: built-in defaults, the host settings store, and the
//! `CHAT_PERMS_PLUGIN_SETTINGS` environment override.

pub mod admin;
pub mod resolver;
pub mod store;

use chatperms_types::DisplayType;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Settings-store namespace (also the admin-surface identifier).
pub const SETTINGS_NAMESPACE: &str = "chat-perms";

/// Environment variable holding a JSON settings override.
pub const SETTINGS_ENV_VAR: &str = "CHAT_PERMS_PLUGIN_SETTINGS";

pub const DEFAULT_ADMIN_UIDS: &[i64] = &[1];
pub const DEFAULT_ALLOW_CHAT_GROUP: &str = "allowChat";
pub const DEFAULT_DENY_CHAT_GROUP: &str = "denyChat";
pub const DEFAULT_MIN_REPUTATION: i64 = 10;
pub const DEFAULT_MIN_POSTS: i64 = 5;
pub const DEFAULT_NOT_YET_ALLOWED_MESSAGE: &str = "CHAT_NOT_YET_ALLOWED_MESSAGE";
pub const DEFAULT_DENIED_MESSAGE: &str = "CHAT_DENIED_MESSAGE";
pub const DEFAULT_WARNING_MESSAGE: &str = "שים לב: ההנהלה יכולה לצפות בהודעות הצ'אט";

/// Fully resolved configuration.
///
/// Always fully populated: absent or invalid inputs fall back to defaults
/// at every layer, so no consumer ever sees a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub admin_uids: Vec<i64>,
    pub allow_chat_group: String,
    pub deny_chat_group: String,
    pub min_reputation: i64,
    pub min_posts: i64,
    pub chat_not_yet_allowed_message: String,
    pub chat_denied_message: String,
    pub warning_enabled: bool,
    pub warning_message: String,
    pub warning_display_type: DisplayType,
    pub keyword_alerts_enabled: bool,
    pub keyword_list: Vec<String>,
    pub alert_recipient_uids: Vec<i64>,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            admin_uids: DEFAULT_ADMIN_UIDS.to_vec(),
            allow_chat_group: DEFAULT_ALLOW_CHAT_GROUP.to_string(),
            deny_chat_group: DEFAULT_DENY_CHAT_GROUP.to_string(),
            min_reputation: DEFAULT_MIN_REPUTATION,
            min_posts: DEFAULT_MIN_POSTS,
            chat_not_yet_allowed_message: DEFAULT_NOT_YET_ALLOWED_MESSAGE.to_string(),
            chat_denied_message: DEFAULT_DENIED_MESSAGE.to_string(),
            warning_enabled: false,
            warning_message: DEFAULT_WARNING_MESSAGE.to_string(),
            warning_display_type: DisplayType::Banner,
            keyword_alerts_enabled: false,
            keyword_list: Vec::new(),
            alert_recipient_uids: Vec::new(),
        }
    }
}

/// Process-wide settings snapshot.
///
/// Read-mostly: readers take a cheap `Arc` clone, and the admin save path
/// replaces the whole snapshot at once. Readers never observe a partially
/// updated settings object; concurrent saves are last-writer-wins.
#[derive(Debug)]
pub struct SettingsCache {
    current: RwLock<Arc<EffectiveSettings>>,
}

impl SettingsCache {
    pub fn new(settings: EffectiveSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<EffectiveSettings> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Replace the snapshot atomically.
    pub fn replace(&self, settings: EffectiveSettings) {
        *self.current.write().unwrap() = Arc::new(settings);
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new(EffectiveSettings::default())
    }
}
