//! Collaborator ports for the hosting application.
//!
//! The pipeline never resolves host modules dynamically; everything it
//! needs from the host comes through these narrow traits, implemented by
//! the host's integration layer (or the in-memory adapters for tests).

pub mod memory;
pub mod ports;

pub use memory::{CollectingSink, MemorySettingsStore, StaticDirectory};
pub use ports::{
    GroupLookup, GroupMembership, Notification, NotificationSink, NotificationSpec, PortFuture,
    SettingsStore, UserLookup, UserProfile,
};
