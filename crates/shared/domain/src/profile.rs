//! Document-store profile entity and its deletion event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PROFILE_COLLECTION;
use crate::user_id::UserId;

/// Per-user profile document in the `usuarios` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub uid: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileDocument {
    /// Create an empty profile document for `uid`.
    pub fn new(uid: UserId) -> Self {
        let now = Utc::now();
        Self {
            uid,
            name: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Document path, e.g. `usuarios/u123`.
    pub fn path(&self) -> String {
        document_path(&self.uid)
    }
}

/// Document path for a user id.
pub fn document_path(uid: &UserId) -> String {
    format!("{}/{}", PROFILE_COLLECTION, uid)
}

/// Emitted once for every profile document that was actually removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDeleted {
    pub uid: UserId,
    pub deleted_at: DateTime<Utc>,
}

impl ProfileDeleted {
    pub fn new(uid: UserId) -> Self {
        Self {
            uid,
            deleted_at: Utc::now(),
        }
    }

    /// Path of the document that was removed.
    pub fn path(&self) -> String {
        document_path(&self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_uses_collection() {
        let uid = UserId::parse("u456").unwrap();
        assert_eq!(ProfileDocument::new(uid.clone()).path(), "usuarios/u456");
        assert_eq!(ProfileDeleted::new(uid).path(), "usuarios/u456");
    }
}
