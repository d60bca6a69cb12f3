//! Role module - customer/professional role per account and where each lands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::foundation::ValidationError;

/// Role an account plays in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Professional,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Professional => "professional",
        }
    }

    /// Landing route and default dashboard tab for this role.
    pub fn home(&self) -> RoleHome {
        match self {
            UserRole::Customer => RoleHome {
                route: "/dashboard",
                default_tab: "my-reviews",
            },
            UserRole::Professional => RoleHome {
                route: "/professional/dashboard",
                default_tab: "profile",
            },
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "professional" => Ok(UserRole::Professional),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Where the client should send a user after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleHome {
    pub route: &'static str,
    pub default_tab: &'static str,
}

/// Outcome of resolving an account's role.
///
/// Resolution never fails outright: a store error degrades to the customer
/// role with the error message attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleResolution {
    pub role: UserRole,
    pub has_record: bool,
    pub error: Option<String>,
}

impl RoleResolution {
    pub fn found(role: UserRole) -> Self {
        Self {
            role,
            has_record: true,
            error: None,
        }
    }

    pub fn missing() -> Self {
        Self {
            role: UserRole::Customer,
            has_record: false,
            error: None,
        }
    }

    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            role: UserRole::Customer,
            has_record: false,
            error: Some(error.into()),
        }
    }

    pub fn home(&self) -> RoleHome {
        self.role.home()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!("Professional".parse::<UserRole>().unwrap(), UserRole::Professional);
        assert_eq!(" customer ".parse::<UserRole>().unwrap(), UserRole::Customer);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn each_role_has_its_own_home() {
        assert_eq!(UserRole::Customer.home().route, "/dashboard");
        assert_eq!(UserRole::Customer.home().default_tab, "my-reviews");
        assert_eq!(UserRole::Professional.home().route, "/professional/dashboard");
        assert_eq!(UserRole::Professional.home().default_tab, "profile");
    }

    #[test]
    fn missing_record_resolves_to_customer() {
        let res = RoleResolution::missing();
        assert_eq!(res.role, UserRole::Customer);
        assert!(!res.has_record);
        assert!(res.error.is_none());
    }

    #[test]
    fn degraded_resolution_keeps_message() {
        let res = RoleResolution::degraded("connection refused");
        assert_eq!(res.role, UserRole::Customer);
        assert_eq!(res.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Professional).unwrap(),
            "\"professional\""
        );
    }
}
