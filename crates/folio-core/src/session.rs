//! # Session State
//!
//! The signed-in user and the snapshot pages read to decide whether
//! mutating controls are shown.
//!
//! Sign-in is a local name prompt with no verification. It gates what the
//! UI shows and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_USER_NAME;

/// The signed-in user, as persisted under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub name: String,
    /// Absent in sessions written before timestamps were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl User {
    /// Builds a user from a typed name. Blank names become [`DEFAULT_USER_NAME`].
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use folio_core::session::User;
    ///
    /// assert_eq!(User::sign_in("  Ada ", Utc::now()).name, "Ada");
    /// assert_eq!(User::sign_in("   ", Utc::now()).name, "User");
    /// ```
    pub fn sign_in(name: &str, at: DateTime<Utc>) -> Self {
        let name = name.trim();
        User {
            name: if name.is_empty() {
                DEFAULT_USER_NAME.to_string()
            } else {
                name.to_string()
            },
            signed_in_at: Some(at),
        }
    }
}

/// What a page sees of the auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthSnapshot {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn from_user(user: Option<User>) -> Self {
        AuthSnapshot {
            is_authenticated: user.is_some(),
            user,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.name.as_str())
    }
}
