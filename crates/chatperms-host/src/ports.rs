//! Dyn-compatible port traits the host integration layer implements.

use chatperms_types::HostError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by port methods.
///
/// Uses `Pin<Box<dyn Future>>` for dyn-compatibility, so ports can live
/// behind `Arc<dyn …>` in the engine.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, HostError>> + Send + 'a>>;

/// A resolved user profile from the host's user service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: i64,
    pub username: String,
    pub reputation: i64,
    pub postcount: i64,
    pub joindate: DateTime<Utc>,
}

/// One group membership row from the host's group service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub name: String,
}

/// Host user service.
pub trait UserLookup: Send + Sync {
    fn get_user_data(&self, uid: i64) -> PortFuture<'_, UserProfile>;
}

/// Host group service.
pub trait GroupLookup: Send + Sync {
    /// Groups the user belongs to. Unknown users resolve to an empty list.
    fn get_user_groups(&self, uid: i64) -> PortFuture<'_, Vec<GroupMembership>>;
}

/// Host key-value settings store.
///
/// Values are always stored and read as strings; array-valued settings are
/// JSON-encoded by the caller before `set` and decoded by the resolver on
/// `get`.
pub trait SettingsStore: Send + Sync {
    fn get(&self, namespace: &str) -> PortFuture<'_, HashMap<String, String>>;

    /// Merge the provided keys into the namespace. Keys not present in
    /// `values` keep their stored value.
    fn set(&self, namespace: &str, values: HashMap<String, String>) -> PortFuture<'_, ()>;
}

/// A notification to be created and pushed through the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "bodyShort")]
    pub body_short: String,
    #[serde(rename = "bodyLong")]
    pub body_long: String,
    /// Dedup id. Hosts treat a repeated nid as the same notification, so
    /// re-dispatching a given alert is idempotent.
    pub nid: String,
    pub from: i64,
    pub path: String,
}

/// A created notification, ready to push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub spec: NotificationSpec,
}

/// Host notification system.
pub trait NotificationSink: Send + Sync {
    fn create(&self, spec: NotificationSpec) -> PortFuture<'_, Notification>;

    fn push(&self, notification: Notification, recipient_uids: Vec<i64>) -> PortFuture<'_, ()>;
}
