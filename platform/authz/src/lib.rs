//! Authorization primitives for the directory.
//!
//! Callers arrive with a [`Caller`] resolved by the transport layer; the
//! directory asks an [`Authorizer`] before touching state. [`PolicyEngine`]
//! is the default implementation: reads are open, writes need [`Role::Admin`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("action {action} denied for resource {resource}")]
    Denied { action: String, resource: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role `{0}` (expected ADMIN or EMPLOYEE)")]
pub struct ParseRoleError(String);

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            _ => Err(ParseRoleError(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn is_write(self) -> bool {
        !matches!(self, Action::Read)
    }
}

/// Identity attached to a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub subject: Option<String>,
    pub role: Role,
}

impl Caller {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: Some(subject.into()),
            role,
        }
    }

    pub fn anonymous(role: Role) -> Self {
        Self {
            subject: None,
            role,
        }
    }

    pub fn admin() -> Self {
        Self::anonymous(Role::Admin)
    }

    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("anonymous")
    }
}

impl Default for Caller {
    fn default() -> Self {
        Self::anonymous(Role::Employee)
    }
}

pub trait Authorizer: Send + Sync {
    fn authorize(&self, caller: &Caller, action: Action, resource: &str)
    -> Result<(), AuthzError>;
}

#[derive(Default, Debug)]
pub struct PolicyEngine;

impl Authorizer for PolicyEngine {
    fn authorize(
        &self,
        caller: &Caller,
        action: Action,
        resource: &str,
    ) -> Result<(), AuthzError> {
        if !action.is_write() || caller.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthzError::Denied {
                action: action.as_str().to_string(),
                resource: resource.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_open_to_everyone() {
        let engine = PolicyEngine;
        assert!(engine.authorize(&Caller::default(), Action::Read, "employee").is_ok());
        assert!(engine.authorize(&Caller::admin(), Action::Read, "employee").is_ok());
    }

    #[test]
    fn writes_require_admin() {
        let engine = PolicyEngine;
        let employee = Caller::new("jane", Role::Employee);
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(engine.authorize(&Caller::admin(), action, "employee").is_ok());
            let err = engine.authorize(&employee, action, "employee").unwrap_err();
            assert_eq!(
                err,
                AuthzError::Denied {
                    action: action.as_str().into(),
                    resource: "employee".into(),
                }
            );
        }
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" EMPLOYEE ".parse::<Role>().unwrap(), Role::Employee);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn roles_serialize_in_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let parsed: Role = serde_json::from_str("\"EMPLOYEE\"").unwrap();
        assert_eq!(parsed, Role::Employee);
    }
}
