//! In-memory adapters, for embedding the pipeline without a host and for
//! tests.

use crate::ports::{
    GroupLookup, GroupMembership, Notification, NotificationSink, NotificationSpec, PortFuture,
    SettingsStore, UserLookup, UserProfile,
};
use chatperms_types::HostError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed user/group directory.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    users: HashMap<i64, UserProfile>,
    groups: HashMap<i64, Vec<GroupMembership>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.users.insert(profile.uid, profile);
        self
    }

    pub fn with_groups(mut self, uid: i64, names: &[&str]) -> Self {
        self.groups.insert(
            uid,
            names
                .iter()
                .map(|name| GroupMembership {
                    name: (*name).to_string(),
                })
                .collect(),
        );
        self
    }
}

impl UserLookup for StaticDirectory {
    fn get_user_data(&self, uid: i64) -> PortFuture<'_, UserProfile> {
        let result = self
            .users
            .get(&uid)
            .cloned()
            .ok_or_else(|| HostError::UserLookup {
                uid,
                message: "no such user".to_string(),
            });
        Box::pin(async move { result })
    }
}

impl GroupLookup for StaticDirectory {
    fn get_user_groups(&self, uid: i64) -> PortFuture<'_, Vec<GroupMembership>> {
        let result = Ok(self.groups.get(&uid).cloned().unwrap_or_default());
        Box::pin(async move { result })
    }
}

/// Settings store backed by a process-local map of namespaces.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    namespaces: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a namespace with initial values, merging over what is there.
    pub fn seed(&self, namespace: &str, values: HashMap<String, String>) {
        self.namespaces
            .lock()
            .unwrap()
            .entry(namespace.to_string())
            .or_default()
            .extend(values);
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, namespace: &str) -> PortFuture<'_, HashMap<String, String>> {
        let values = self
            .namespaces
            .lock()
            .unwrap()
            .get(namespace)
            .cloned()
            .unwrap_or_default();
        Box::pin(async move { Ok(values) })
    }

    fn set(&self, namespace: &str, values: HashMap<String, String>) -> PortFuture<'_, ()> {
        self.namespaces
            .lock()
            .unwrap()
            .entry(namespace.to_string())
            .or_default()
            .extend(values);
        Box::pin(async move { Ok(()) })
    }
}

/// Sink that records every pushed notification.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pushed: Mutex<Vec<(NotificationSpec, Vec<i64>)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything pushed so far, in push order.
    pub fn pushed(&self) -> Vec<(NotificationSpec, Vec<i64>)> {
        self.pushed.lock().unwrap().clone()
    }
}

impl NotificationSink for CollectingSink {
    fn create(&self, spec: NotificationSpec) -> PortFuture<'_, Notification> {
        Box::pin(async move { Ok(Notification { spec }) })
    }

    fn push(&self, notification: Notification, recipient_uids: Vec<i64>) -> PortFuture<'_, ()> {
        self.pushed
            .lock()
            .unwrap()
            .push((notification.spec, recipient_uids));
        Box::pin(async move { Ok(()) })
    }
}
