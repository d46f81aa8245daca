//! Notification jobs queued by the account handlers.

use serde::{Deserialize, Serialize};

/// Account event that triggers an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Registered,
    ProfileUpdated,
    AccountDeleted,
    PasswordChanged,
}

/// One email to send
///
/// Carries only what the templates need, captured when the event happened;
/// an `AccountDeleted` job outlives the row it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub kind: NotificationKind,
    pub first_name: String,
    pub email: String,
}

impl NotificationJob {
    pub fn new(kind: NotificationKind, first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            kind,
            first_name: first_name.into(),
            email: email.into(),
        }
    }
}
