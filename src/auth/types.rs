//! Types for the signed-in user

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to a user account
///
/// Only `"admin"` carries special meaning on the client; every other value
/// is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// May import and export data
    Admin,

    /// Any other role name
    Other(String),
}

impl Role {
    /// Whether this is the admin role
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// The role name as sent by the backend
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Other(name) => name,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other("user".to_string())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == "admin" {
            Role::Admin
        } else {
            Role::Other(value)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User data returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Google account ID, for users who signed in with Google
    #[serde(rename = "googleId", default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,

    /// Display name
    #[serde(rename = "displayName", default, deserialize_with = "crate::de::null_as_default")]
    pub display_name: String,

    /// Email address
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub email: String,

    /// Account role
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub role: Role,

    /// Creation timestamp
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
