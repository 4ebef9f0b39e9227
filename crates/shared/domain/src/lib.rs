//! Domain layer - Employee records, user accounts and access rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Every other crate in the workspace builds on these types.

pub mod access;
pub mod account;
pub mod constants;
pub mod employee;
pub mod error;
pub mod password;
pub mod search;

pub use access::{authorize, Operation, Resource};
pub use account::{
    AccountId, AccountSecret, NewAccount, Registration, Role, Session, User, UserAccount,
};
pub use constants::*;
pub use employee::{
    Child, Education, EducationLevel, Employee, EmployeeId, Family, FormOptions, MaritalStatus,
    NewEmployee, Sex, Spouse,
};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use search::{matches_own_record, EmployeeFilter};
