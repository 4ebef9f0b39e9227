//! Record store contract.

use async_trait::async_trait;

use common::AppResult;
use domain::{
    AccountId, AccountSecret, Education, Employee, EmployeeId, Family, NewAccount, NewEmployee,
    Password, UserAccount,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authoritative CRUD over the employee and account collections.
///
/// Every operation settles asynchronously and hands out owned copies, so no
/// caller can observe or cause aliasing with the stored records. Employees are
/// listed most-recent-first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find an employee by id
    async fn find_employee_by_id(&self, id: &EmployeeId) -> AppResult<Option<Employee>>;

    /// List all employees, newest first
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;

    /// Replace the stored record with the same id (`NotFound` if absent)
    async fn update_employee(&self, employee: Employee) -> AppResult<Employee>;

    /// Replace the family record of one employee (`NotFound` if absent)
    async fn update_family(&self, id: &EmployeeId, family: Family) -> AppResult<()>;

    /// Replace the education list of one employee (`NotFound` if absent)
    async fn update_education(&self, id: &EmployeeId, education: Vec<Education>)
        -> AppResult<()>;

    /// Remove an employee and every account linked to it.
    /// Returns whether an employee was removed.
    async fn delete_employee(&self, id: &EmployeeId) -> AppResult<bool>;

    /// Insert a new employee at the front of the listing, optionally with a
    /// linked account. The account's employee link is set by the store.
    /// Fails with `UsernameTaken`, writing nothing, if the account's username is in use.
    async fn add_employee(
        &self,
        data: NewEmployee,
        account: Option<NewAccount>,
    ) -> AppResult<Employee>;

    /// List all accounts (without passwords)
    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>>;

    /// Find an account with its password hash, by exact username
    async fn find_account_by_username(&self, username: &str) -> AppResult<Option<AccountSecret>>;

    /// Insert an account. No username uniqueness check happens here.
    async fn add_account(&self, account: NewAccount) -> AppResult<UserAccount>;

    /// Insert an account in one step with its checks: `UsernameTaken` if the
    /// username is in use, `NotFound` if the linked employee does not exist,
    /// `Conflict` if another account already links to it.
    async fn add_account_checked(&self, account: NewAccount) -> AppResult<UserAccount>;

    /// Remove an account, leaving any linked employee in place.
    /// Returns whether an account was removed.
    async fn delete_account(&self, id: &AccountId) -> AppResult<bool>;

    /// Replace an account's password hash (`NotFound` if absent)
    async fn reset_password(&self, id: &AccountId, password: Password) -> AppResult<()>;

    /// Atomically create a blank employee and a linked USER account.
    /// Fails with `UsernameTaken` if the username is in use.
    async fn register(
        &self,
        name: String,
        username: String,
        password: Password,
    ) -> AppResult<(Employee, UserAccount)>;

    /// Employees no account links to
    async fn unassigned_employees(&self) -> AppResult<Vec<Employee>>;
}
