//! The hook engine — entry points the host dispatches chat events to.

use crate::gate;
use crate::version;
use crate::warning::inject_warning;
use chatperms_config::SettingsCache;
use chatperms_host::{GroupLookup, NotificationSink, UserLookup};
use chatperms_scanner::{AlertPipeline, MessageEvent};
use chatperms_types::{GateError, HookPayload};
use serde_json::{Map, Value};
use std::sync::Arc;

/// The central hook engine: normalizes payloads, gates access, scans
/// content, and annotates outbound data.
pub struct HookEngine {
    users: Arc<dyn UserLookup>,
    groups: Arc<dyn GroupLookup>,
    settings: Arc<SettingsCache>,
    alerts: AlertPipeline,
}

impl HookEngine {
    /// Build an engine over the host ports.
    ///
    /// `host_version` feeds the advisory compatibility check; an
    /// incompatible or undetectable version is logged and never blocks
    /// the hooks.
    pub fn new(
        users: Arc<dyn UserLookup>,
        groups: Arc<dyn GroupLookup>,
        notifications: Arc<dyn NotificationSink>,
        settings: Arc<SettingsCache>,
        host_version: Option<&str>,
    ) -> Self {
        if !version::is_compatible(host_version) {
            tracing::warn!("pipeline may not function correctly with this host version");
        }
        let alerts = AlertPipeline::new(Arc::clone(&users), notifications, Arc::clone(&settings));
        Self {
            users,
            groups,
            settings,
            alerts,
        }
    }

    /// Hook: can the caller read a user's messages.
    ///
    /// Order is authoritative: eligibility, deny group, then the
    /// cross-user identity rule; the first failing rule wins. On success
    /// the payload carries the privacy warning when enabled.
    pub async fn on_can_read_messages(&self, raw: Value) -> Result<Value, GateError> {
        let mut defaults = Map::new();
        defaults.insert("canGet".to_string(), Value::Bool(true));
        let mut payload = HookPayload::normalize(raw, &defaults);
        payload.insert("canGet", Value::Bool(true));

        let settings = self.settings.current();
        let caller_uid = payload.caller_uid();
        let uid = caller_uid.unwrap_or(0);
        let profile = self.users.get_user_data(uid).await?;
        let groups = self.groups.get_user_groups(uid).await?;
        gate::check_can_chat(&profile, &groups, &settings, chrono::Utc::now())?;
        gate::check_read_identity(caller_uid, payload.uid(), &settings)?;

        Ok(inject_warning(payload.into_value(), &settings))
    }

    /// Hook: user replies in a chat. Content-bearing; scans for keywords.
    pub async fn on_can_reply(&self, raw: Value) -> Result<Value, GateError> {
        let payload = HookPayload::normalize(raw, &Map::new());
        self.scan_payload(&payload).await;
        Ok(payload.into_value())
    }

    /// Hook: user opens a chat with another user.
    pub async fn on_can_message_user(&self, raw: Value) -> Result<Value, GateError> {
        let payload = HookPayload::normalize(raw, &Map::new());
        let settings = self.settings.current();
        let uid = payload.uid().unwrap_or(0);
        let profile = self.users.get_user_data(uid).await?;
        let groups = self.groups.get_user_groups(uid).await?;
        gate::check_can_chat(&profile, &groups, &settings, chrono::Utc::now())?;
        Ok(payload.into_value())
    }

    /// Hook: user posts into a room. Content-bearing; scans for keywords.
    pub async fn on_can_message_room(&self, raw: Value) -> Result<Value, GateError> {
        let payload = HookPayload::normalize(raw, &Map::new());
        self.scan_payload(&payload).await;
        Ok(payload.into_value())
    }

    /// Hook: room-membership check. Admin uids are always in the room,
    /// bypassing the host's membership lookup.
    pub async fn on_is_user_in_room(&self, raw: Value) -> Result<Value, GateError> {
        let mut payload = HookPayload::normalize(raw, &Map::new());
        let settings = self.settings.current();
        if payload
            .uid()
            .is_some_and(|uid| settings.admin_uids.contains(&uid))
        {
            payload.insert("inRoom", Value::Bool(true));
        }
        Ok(payload.into_value())
    }

    async fn scan_payload(&self, payload: &HookPayload) {
        let Some(content) = payload.content() else {
            return;
        };
        if content.is_empty() {
            return;
        }
        let event = MessageEvent {
            content: content.to_string(),
            uid: payload.uid().unwrap_or(0),
            room_id: payload.room_id().unwrap_or(0),
        };
        self.alerts.process_message(&event).await;
    }
}
