use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Opaque credential attached to authenticated requests. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: BearerToken,
    pub role: Role,
    pub user_id: String,
    pub display_name: String,
}

impl Session {
    /// Banner shown above every dashboard.
    pub fn welcome_message(&self) -> String {
        format!("Welcome, {}! ({})", self.display_name, self.role.label())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"..")
            .finish()
    }
}
