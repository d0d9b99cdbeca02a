//! Identity-store account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user_id::UserId;

/// Authentication account held by the identity store.
///
/// Only its existence matters to the deletion flow; the remaining fields
/// are carried so the store can be seeded and inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub uid: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}

impl AuthRecord {
    /// Create an enabled account with no profile fields.
    pub fn new(uid: UserId) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
            disabled: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
