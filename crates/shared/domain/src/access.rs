//! Access control.
//!
//! A pure function of the session identity and the requested resource and
//! operation. Callers must treat every `Err` as a denial.

use crate::account::{Role, User};
use crate::employee::EmployeeId;
use crate::error::{DomainError, DomainResult};

/// What is being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    /// Login and self-registration
    Authentication,
    /// A single employee record
    Employee(&'a EmployeeId),
    /// The full employee listing (list, filter, create)
    EmployeeDirectory,
    /// Search restricted to the caller's own record
    OwnRecordSearch,
    /// User account management
    Accounts,
    /// Aggregate statistics
    Statistics,
    /// Report export
    ReportExport,
}

/// What is being done to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// Decide whether `user` may perform `operation` on `resource`.
///
/// Anonymous sessions get `Unauthorized` for everything except authentication.
/// Authenticated sessions lacking permission get `Forbidden`.
pub fn authorize(
    user: Option<&User>,
    resource: Resource<'_>,
    operation: Operation,
) -> DomainResult<()> {
    let Some(user) = user else {
        return match resource {
            Resource::Authentication => Ok(()),
            _ => Err(DomainError::Unauthorized),
        };
    };

    let allowed = match user.role {
        Role::User => match resource {
            Resource::Authentication => true,
            Resource::Employee(id) => {
                user.owns(id) && matches!(operation, Operation::Read | Operation::Update)
            }
            Resource::OwnRecordSearch => operation == Operation::Read,
            Resource::EmployeeDirectory
            | Resource::Accounts
            | Resource::Statistics
            | Resource::ReportExport => false,
        },
        Role::Admin => match resource {
            Resource::Authentication
            | Resource::Employee(_)
            | Resource::EmployeeDirectory
            | Resource::Accounts
            | Resource::Statistics
            | Resource::ReportExport => true,
            // The search view belongs to the self-service screens.
            Resource::OwnRecordSearch => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
