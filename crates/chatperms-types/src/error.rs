//! Error hierarchy for chatperms.

use thiserror::Error;

/// Failures surfaced to the host from hook entry points.
///
/// The three permission variants carry the exact user-facing text in their
/// `Display` output; the host shows it verbatim. Everything else in the
/// pipeline fails open and never reaches this type.
#[derive(Debug, Error)]
pub enum GateError {
    /// Caller has not met the reputation/post-count/age thresholds yet.
    #[error("{0}")]
    NotYetEligible(String),

    /// Caller belongs to the configured deny group.
    #[error("{0}")]
    AccessDenied(String),

    /// Caller tried to read another user's messages without admin rights.
    #[error("אין גישה!")]
    AccessForbidden,

    /// A collaborator lookup failed while a permission check required it.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Failures from the host collaborators behind the ports.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("user lookup failed for uid {uid}: {message}")]
    UserLookup { uid: i64, message: String },

    #[error("group lookup failed for uid {uid}: {message}")]
    GroupLookup { uid: i64, message: String },

    #[error("settings store error: {0}")]
    Store(String),

    #[error("notification delivery failed: {0}")]
    Notification(String),
}
