//! In-memory record store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use common::{AppError, AppResult};
use domain::{
    AccountId, AccountSecret, Education, Employee, EmployeeId, Family, NewAccount, NewEmployee,
    Password, Role, UserAccount,
};

use super::record_store::RecordStore;
use super::seed;
use crate::latency::LatencyPolicy;

#[derive(Debug, Default)]
struct Records {
    /// Newest first
    employees: Vec<Employee>,
    accounts: Vec<AccountSecret>,
}

impl Records {
    fn employee_mut(&mut self, id: &EmployeeId) -> AppResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or(AppError::NotFound)
    }

    fn username_taken(&self, username: &str) -> bool {
        self.accounts.iter().any(|a| a.account.username == username)
    }

    /// Username is free and the employee link, if any, points at an existing
    /// employee no other account references.
    fn check_new_account(&self, account: &NewAccount) -> AppResult<()> {
        if self.username_taken(&account.username) {
            return Err(AppError::UsernameTaken);
        }
        if let Some(id) = &account.employee_id {
            if !self.employees.iter().any(|e| &e.id == id) {
                return Err(AppError::NotFound);
            }
            if self.accounts.iter().any(|a| a.account.is_linked_to(id)) {
                return Err(AppError::conflict("Account for this employee"));
            }
        }
        Ok(())
    }

    fn push_account(&mut self, account: NewAccount) -> UserAccount {
        let stored = AccountSecret {
            account: UserAccount {
                id: AccountId::generate(),
                username: account.username,
                role: account.role,
                employee_id: account.employee_id,
            },
            password: account.password,
        };
        let public = stored.account.clone();
        self.accounts.push(stored);
        public
    }
}

/// Process-scoped store holding both collections behind one lock.
///
/// Every mutation takes the write lock, so concurrent requests are serialized
/// per call and observe a single before/after transition.
pub struct InMemoryStore {
    records: RwLock<Records>,
    latency: LatencyPolicy,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new(latency: LatencyPolicy) -> Self {
        Self::with_records(Vec::new(), Vec::new(), latency)
    }

    /// Create a store holding the given records. `employees` is expected newest first.
    pub fn with_records(
        employees: Vec<Employee>,
        accounts: Vec<AccountSecret>,
        latency: LatencyPolicy,
    ) -> Self {
        Self {
            records: RwLock::new(Records {
                employees,
                accounts,
            }),
            latency,
        }
    }

    /// Create a store loaded with the demo employees and accounts.
    pub fn seeded(latency: LatencyPolicy) -> AppResult<Self> {
        let (employees, accounts) = seed::demo_records()?;
        Ok(Self::with_records(employees, accounts, latency))
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_employee_by_id(&self, id: &EmployeeId) -> AppResult<Option<Employee>> {
        self.latency.wait().await;
        let records = self.records.read().await;
        Ok(records.employees.iter().find(|e| &e.id == id).cloned())
    }

    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.latency.wait().await;
        Ok(self.records.read().await.employees.clone())
    }

    async fn update_employee(&self, employee: Employee) -> AppResult<Employee> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let stored = records.employee_mut(&employee.id)?;
        *stored = employee.clone();
        debug!(employee_id = %employee.id, "Employee replaced");
        Ok(employee)
    }

    async fn update_family(&self, id: &EmployeeId, family: Family) -> AppResult<()> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        records.employee_mut(id)?.family = family;
        Ok(())
    }

    async fn update_education(
        &self,
        id: &EmployeeId,
        education: Vec<Education>,
    ) -> AppResult<()> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        records.employee_mut(id)?.education = education;
        Ok(())
    }

    async fn delete_employee(&self, id: &EmployeeId) -> AppResult<bool> {
        self.latency.wait().await;
        let mut records = self.records.write().await;

        let before = records.employees.len();
        records.employees.retain(|e| &e.id != id);
        let removed = records.employees.len() < before;

        // Cascade regardless, so no account is ever left pointing at a missing employee.
        let accounts_before = records.accounts.len();
        records.accounts.retain(|a| !a.account.is_linked_to(id));
        let accounts_removed = accounts_before - records.accounts.len();

        debug!(employee_id = %id, removed, accounts_removed, "Employee delete");
        Ok(removed)
    }

    async fn add_employee(
        &self,
        data: NewEmployee,
        account: Option<NewAccount>,
    ) -> AppResult<Employee> {
        self.latency.wait().await;
        let mut records = self.records.write().await;

        if let Some(account) = &account {
            if records.username_taken(&account.username) {
                return Err(AppError::UsernameTaken);
            }
        }

        let employee = Employee::from_new(EmployeeId::generate(), data);
        records.employees.insert(0, employee.clone());

        if let Some(account) = account {
            records.push_account(NewAccount {
                employee_id: Some(employee.id.clone()),
                ..account
            });
        }

        Ok(employee)
    }

    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>> {
        self.latency.wait().await;
        let records = self.records.read().await;
        Ok(records.accounts.iter().map(|a| a.account.clone()).collect())
    }

    async fn find_account_by_username(&self, username: &str) -> AppResult<Option<AccountSecret>> {
        self.latency.wait().await;
        let records = self.records.read().await;
        Ok(records
            .accounts
            .iter()
            .find(|a| a.account.username == username)
            .cloned())
    }

    async fn add_account(&self, account: NewAccount) -> AppResult<UserAccount> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        Ok(records.push_account(account))
    }

    async fn add_account_checked(&self, account: NewAccount) -> AppResult<UserAccount> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        records.check_new_account(&account)?;
        Ok(records.push_account(account))
    }

    async fn delete_account(&self, id: &AccountId) -> AppResult<bool> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let before = records.accounts.len();
        records.accounts.retain(|a| &a.account.id != id);
        Ok(records.accounts.len() < before)
    }

    async fn reset_password(&self, id: &AccountId, password: Password) -> AppResult<()> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let stored = records
            .accounts
            .iter_mut()
            .find(|a| &a.account.id == id)
            .ok_or(AppError::NotFound)?;
        stored.password = password;
        Ok(())
    }

    async fn register(
        &self,
        name: String,
        username: String,
        password: Password,
    ) -> AppResult<(Employee, UserAccount)> {
        self.latency.wait().await;
        let mut records = self.records.write().await;

        if records.username_taken(&username) {
            return Err(AppError::UsernameTaken);
        }

        let employee = Employee::blank(EmployeeId::generate(), name);
        records.employees.insert(0, employee.clone());
        let account = records.push_account(NewAccount {
            username,
            password,
            role: Role::User,
            employee_id: Some(employee.id.clone()),
        });

        Ok((employee, account))
    }

    async fn unassigned_employees(&self) -> AppResult<Vec<Employee>> {
        self.latency.wait().await;
        let records = self.records.read().await;
        Ok(records
            .employees
            .iter()
            .filter(|e| !records.accounts.iter().any(|a| a.account.is_linked_to(&e.id)))
            .cloned()
            .collect())
    }
}
