//! Alert delivery and the message-processing pipeline.

use crate::alert::{AlertRecord, build_alert};
use crate::scan::scan_message;
use chatperms_config::SettingsCache;
use chatperms_host::{NotificationSink, NotificationSpec, UserLookup};
use serde_json::json;
use std::sync::Arc;

/// Notification type tag on keyword alerts.
pub const ALERT_NOTIFICATION_TYPE: &str = "chat-perms-keyword-alert";

/// Outcome of running a message through the keyword pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub matched: bool,
    pub keywords: Vec<String>,
}

/// A message event from a content-bearing hook.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub content: String,
    pub uid: i64,
    pub room_id: i64,
}

/// Deliver an alert to the configured recipients.
///
/// Returns false without side effects when no strictly positive recipient
/// uids are configured. Delivery failures are caught, logged, and reported
/// as false — never raised, never retried here. The nid is derived from
/// the room and timestamp, so re-dispatching the same alert is idempotent
/// on the host side.
pub async fn send_alert(
    sink: &dyn NotificationSink,
    alert: &AlertRecord,
    recipient_uids: &[i64],
) -> bool {
    let recipients: Vec<i64> = recipient_uids
        .iter()
        .copied()
        .filter(|uid| *uid > 0)
        .collect();
    if recipients.is_empty() {
        tracing::warn!("no alert recipients configured, dropping keyword alert");
        return false;
    }

    let keywords = alert.matched_keywords.join(", ");
    let spec = NotificationSpec {
        kind: ALERT_NOTIFICATION_TYPE.to_string(),
        body_short: format!("התראת מילים רגישות: {keywords}"),
        body_long: format!(
            "משתמש {} שלח הודעה בחדר {} עם מילים רגישות: {}\n\nתוכן ההודעה: {}",
            alert.sender_username, alert.room_id, keywords, alert.message_content
        ),
        nid: format!(
            "chat-perms:keyword-alert:{}:{}",
            alert.room_id,
            alert.timestamp.timestamp_millis()
        ),
        from: alert.sender_uid,
        path: format!("/chats/{}", alert.room_id),
    };

    match sink.create(spec).await {
        Ok(notification) => match sink.push(notification, recipients).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("failed to push keyword alert: {err}");
                false
            }
        },
        Err(err) => {
            tracing::error!("failed to create keyword alert: {err}");
            false
        }
    }
}

/// The keyword-alert pipeline: scan, resolve the sender, dispatch.
pub struct AlertPipeline {
    users: Arc<dyn UserLookup>,
    notifications: Arc<dyn NotificationSink>,
    settings: Arc<SettingsCache>,
}

impl AlertPipeline {
    pub fn new(
        users: Arc<dyn UserLookup>,
        notifications: Arc<dyn NotificationSink>,
        settings: Arc<SettingsCache>,
    ) -> Self {
        Self {
            users,
            notifications,
            settings,
        }
    }

    /// Process one message for keyword alerts.
    ///
    /// Short-circuits when keyword alerts are disabled or nothing matches.
    /// On a match, the sender's username is resolved (failing over to
    /// `"unknown"`) and the alert is dispatched on a detached task this
    /// method does not join, so the triggering hook's latency is
    /// unaffected and delivery failure cannot reach the caller.
    pub async fn process_message(&self, event: &MessageEvent) -> ScanOutcome {
        let settings = self.settings.current();
        if !settings.keyword_alerts_enabled {
            return ScanOutcome::default();
        }

        let keywords = scan_message(&event.content, &settings.keyword_list);
        if keywords.is_empty() {
            return ScanOutcome::default();
        }

        let sender_username = match self.users.get_user_data(event.uid).await {
            Ok(profile) => profile.username,
            Err(_) => "unknown".to_string(),
        };

        let alert = build_alert(&json!({
            "messageContent": event.content,
            "senderUid": event.uid,
            "senderUsername": sender_username,
            "roomId": event.room_id,
            "matchedKeywords": keywords,
        }));

        let sink = Arc::clone(&self.notifications);
        let recipients = settings.alert_recipient_uids.clone();
        tokio::spawn(async move {
            send_alert(sink.as_ref(), &alert, &recipients).await;
        });

        ScanOutcome {
            matched: true,
            keywords,
        }
    }
}
