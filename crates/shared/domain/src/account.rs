//! User accounts, session identities and roles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ACCOUNT_ID_PREFIX, MIN_NAME_LENGTH, ROLE_ADMIN, ROLE_USER};
use crate::employee::EmployeeId;
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Self-service access to the linked employee record
    #[default]
    User,
    /// Full management access
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::validation(format!(
                "Invalid role '{}'. Must be 'user' or 'admin'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account identifier (`user-...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(format!("{}-{}", ACCOUNT_ID_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Login identity, optionally linked to one employee.
///
/// The password never leaves the store on this type; see [`AccountSecret`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserAccount {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
    /// Linked employee; administrators usually have none
    #[serde(rename = "pegawaiId", default)]
    pub employee_id: Option<EmployeeId>,
}

impl UserAccount {
    /// Check whether this account is linked to the given employee.
    pub fn is_linked_to(&self, employee_id: &EmployeeId) -> bool {
        self.employee_id.as_ref() == Some(employee_id)
    }
}

/// Account together with its password hash. Only the auth boundary sees this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSecret {
    pub account: UserAccount,
    pub password: Password,
}

/// Data for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: Password,
    pub role: Role,
    pub employee_id: Option<EmployeeId>,
}

/// Sanitized identity of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
    #[serde(rename = "pegawaiId", default)]
    pub employee_id: Option<EmployeeId>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check whether the employee record belongs to this user.
    pub fn owns(&self, employee_id: &EmployeeId) -> bool {
        self.employee_id.as_ref() == Some(employee_id)
    }
}

impl From<UserAccount> for User {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            role: account.role,
            employee_id: account.employee_id,
        }
    }
}

impl From<&UserAccount> for User {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            username: account.username.clone(),
            role: account.role,
            employee_id: account.employee_id.clone(),
        }
    }
}

/// Current authenticated identity plus its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Self-registration form.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Checks that run before any store call.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().chars().count() < MIN_NAME_LENGTH {
            return Err(DomainError::validation("Name is required"));
        }
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::validation(
                "Password and confirmation do not match",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("ADMIN".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_user_owns_only_linked_employee() {
        let user = User {
            id: AccountId::new("user-1"),
            username: "budi".to_string(),
            role: Role::User,
            employee_id: Some(EmployeeId::new("pegawai-1")),
        };

        assert!(user.owns(&EmployeeId::new("pegawai-1")));
        assert!(!user.owns(&EmployeeId::new("pegawai-2")));
    }

    #[test]
    fn test_unlinked_user_owns_nothing() {
        let admin = User {
            id: AccountId::new("user-admin"),
            username: "admin".to_string(),
            role: Role::Admin,
            employee_id: None,
        };

        assert!(!admin.owns(&EmployeeId::new("pegawai-1")));
    }

    #[test]
    fn test_user_serializes_optional_link() {
        let account = UserAccount {
            id: AccountId::new("user-1"),
            username: "budi".to_string(),
            role: Role::User,
            employee_id: Some(EmployeeId::new("pegawai-1")),
        };
        let value = serde_json::to_value(User::from(&account)).unwrap();

        assert_eq!(value["pegawaiId"], "pegawai-1");
        assert_eq!(value["role"], "user");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_registration_validation() {
        let mut form = Registration {
            name: "New Person".to_string(),
            username: "newperson".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        };
        assert!(form.validate().is_ok());

        form.confirm_password = "other".to_string();
        assert!(matches!(form.validate(), Err(DomainError::Validation(_))));

        form.confirm_password = "secret".to_string();
        form.name = "  ".to_string();
        assert!(form.validate().is_err());
    }
}
