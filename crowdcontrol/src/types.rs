use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Body of a password authentication request.
#[derive(Clone, Serialize)]
pub struct AuthenticationRequest {
    /// The user's password
    value: String,
}

impl AuthenticationRequest {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            value: password.into(),
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("value", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// A hyperlink to a Crowd resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation of the link, usually "self"
    pub rel: String,
    /// Absolute URL of the resource
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// A successfully authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Names of expandable sub-resources, e.g. "attributes"
    pub expand: String,
    /// Link to the user resource
    pub link: Link,
    /// The username
    #[serde(rename = "name")]
    pub username: String,
    /// User's given name
    #[serde(rename = "first-name")]
    pub first_name: String,
    /// User's family name
    #[serde(rename = "last-name")]
    pub last_name: String,
    /// User's display name
    #[serde(rename = "display-name")]
    pub display_name: String,
    /// User's email address
    pub email: String,
    /// Crowd's internal user key
    pub key: String,
    /// Whether the account is active
    pub active: bool,
}

/// Group returned when a user is a direct member of it.
///
/// Crowd's payload varies between versions, so every field is optional and
/// anything unrecognised is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupResponse {
    /// Group name
    pub name: Option<String>,
    /// Link to the group resource
    pub link: Option<Link>,
    /// Group description
    pub description: Option<String>,
    /// Group type, "GROUP" or "LEGACY_ROLE"
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    /// Whether the group is active
    pub active: Option<bool>,
    /// Names of expandable sub-resources
    pub expand: Option<String>,

    /// Catch-all for any additional fields from the API
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error body returned when authentication is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationError {
    /// Symbolic reason, e.g. "INVALID_USER_AUTHENTICATION" or "USER_NOT_FOUND"
    pub reason: String,
    /// Human-readable message
    pub message: String,
}

impl AuthenticationError {
    #[must_use]
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

/// Error body returned when a membership lookup fails.
///
/// A user who is not a member of the group is reported this way, with reason
/// "MEMBERSHIP_NOT_FOUND".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupError {
    /// Symbolic reason, e.g. "MEMBERSHIP_NOT_FOUND" or "GROUP_NOT_FOUND"
    pub reason: String,
    /// Human-readable message
    pub message: String,
}

impl GroupError {
    #[must_use]
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}
