/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by every user and by the `userRole` token claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

/// Role strings are matched case-insensitively; anything else is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("유효하지 않은 UserRole")]
pub struct InvalidUserRole;

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = InvalidUserRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("USER") {
            Ok(UserRole::User)
        } else if s.eq_ignore_ascii_case("ADMIN") {
            Ok(UserRole::Admin)
        } else {
            Err(InvalidUserRole)
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
