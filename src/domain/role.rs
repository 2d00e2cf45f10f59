//! Account roles and the markers role gates are parameterized by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Librarian,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Librarian => "librarian",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "librarian" => Ok(Role::Librarian),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Marker for a route's required role, used by the role gate extractor.
pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: Role;
}

/// Routes reserved to admins
pub struct Admin;
/// Routes reserved to librarians
pub struct Librarian;
/// Routes reserved to plain members (role `user`)
pub struct Member;

impl RequiredRole for Admin {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for Librarian {
    const ROLE: Role = Role::Librarian;
}

impl RequiredRole for Member {
    const ROLE: Role = Role::User;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_role_strings() {
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!("librarian".parse::<Role>(), Ok(Role::Librarian));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_roles() {
        assert!("Admin".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Librarian).unwrap(), "\"librarian\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn markers_map_to_roles() {
        assert_eq!(Admin::ROLE, Role::Admin);
        assert_eq!(Librarian::ROLE, Role::Librarian);
        assert_eq!(Member::ROLE, Role::User);
    }
}
