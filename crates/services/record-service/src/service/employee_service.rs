//! Employee service - access-controlled employee record use cases.
//!
//! Every call names the session user it acts for. A USER session touching an
//! employee other than its own gets `NotFound`, exactly as if the record did
//! not exist.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{
    authorize, matches_own_record, DomainError, Education, Employee, EmployeeFilter, EmployeeId,
    Family, NewAccount, NewEmployee, Operation, Password, Resource, Role, User,
};

use crate::repository::RecordStore;

/// Login credentials supplied with a new employee.
///
/// An account is only created when both fields are non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}

impl AccountCredentials {
    fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Distinct positions and grades, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DirectoryFacets {
    pub positions: Vec<String>,
    pub grades: Vec<String>,
}

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Get one employee record
    async fn get_employee(&self, caller: &User, id: &EmployeeId) -> AppResult<Employee>;

    /// List employees matching the filter, newest first (admin only)
    async fn list_employees(&self, caller: &User, filter: &EmployeeFilter)
        -> AppResult<Vec<Employee>>;

    /// Filter options for the directory (admin only)
    async fn directory_facets(&self, caller: &User) -> AppResult<DirectoryFacets>;

    /// Replace an employee's personal and employment data
    async fn update_employee(&self, caller: &User, employee: Employee) -> AppResult<Employee>;

    /// Replace an employee's family record
    async fn update_family(&self, caller: &User, id: &EmployeeId, family: Family)
        -> AppResult<()>;

    /// Replace an employee's education history
    async fn update_education(
        &self,
        caller: &User,
        id: &EmployeeId,
        education: Vec<Education>,
    ) -> AppResult<()>;

    /// Delete an employee and its linked accounts (admin only)
    async fn delete_employee(&self, caller: &User, id: &EmployeeId) -> AppResult<bool>;

    /// Create an employee, optionally with a linked USER account (admin only)
    async fn add_employee(
        &self,
        caller: &User,
        data: NewEmployee,
        credentials: Option<AccountCredentials>,
    ) -> AppResult<Employee>;

    /// Search the caller's own record only
    async fn search_own(&self, caller: &User, term: &str) -> AppResult<Option<Employee>>;
}

/// Concrete implementation of EmployeeService using the record store.
pub struct EmployeeManager {
    store: Arc<dyn RecordStore>,
}

impl EmployeeManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Authorize access to one record, hiding the existence of foreign records.
    fn authorize_record(caller: &User, id: &EmployeeId, operation: Operation) -> AppResult<()> {
        match authorize(Some(caller), Resource::Employee(id), operation) {
            Ok(()) => Ok(()),
            Err(DomainError::Forbidden) => match caller.role {
                Role::User => Err(AppError::NotFound),
                Role::Admin => Err(AppError::Forbidden),
            },
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn get_employee(&self, caller: &User, id: &EmployeeId) -> AppResult<Employee> {
        Self::authorize_record(caller, id, Operation::Read)?;
        self.store.find_employee_by_id(id).await?.ok_or_not_found()
    }

    async fn list_employees(
        &self,
        caller: &User,
        filter: &EmployeeFilter,
    ) -> AppResult<Vec<Employee>> {
        authorize(Some(caller), Resource::EmployeeDirectory, Operation::Read)?;
        let employees = self.store.list_employees().await?;
        if filter.is_empty() {
            return Ok(employees);
        }
        Ok(employees.into_iter().filter(|e| filter.matches(e)).collect())
    }

    async fn directory_facets(&self, caller: &User) -> AppResult<DirectoryFacets> {
        authorize(Some(caller), Resource::EmployeeDirectory, Operation::Read)?;
        let employees = self.store.list_employees().await?;

        let mut facets = DirectoryFacets::default();
        let mut seen_positions = HashSet::new();
        let mut seen_grades = HashSet::new();
        for employee in &employees {
            if !employee.position.is_empty() && seen_positions.insert(employee.position.as_str()) {
                facets.positions.push(employee.position.clone());
            }
            if !employee.grade.is_empty() && seen_grades.insert(employee.grade.as_str()) {
                facets.grades.push(employee.grade.clone());
            }
        }
        Ok(facets)
    }

    async fn update_employee(&self, caller: &User, employee: Employee) -> AppResult<Employee> {
        Self::authorize_record(caller, &employee.id, Operation::Update)?;
        ensure_unique_ids(employee.family.children.iter().map(|c| c.id.as_str()), "child")?;
        ensure_unique_ids(employee.education.iter().map(|e| e.id.as_str()), "education")?;

        let current = self
            .store
            .find_employee_by_id(&employee.id)
            .await?
            .ok_or_not_found()?;
        let changed = current.changed_fields(&employee);
        if changed.is_empty() {
            debug!(employee_id = %employee.id, "Employee update without changes");
            return Ok(current);
        }

        let updated = self.store.update_employee(employee).await?;
        info!(
            employee_id = %updated.id,
            by = %caller.username,
            fields = ?changed,
            "Employee updated"
        );
        Ok(updated)
    }

    async fn update_family(
        &self,
        caller: &User,
        id: &EmployeeId,
        family: Family,
    ) -> AppResult<()> {
        Self::authorize_record(caller, id, Operation::Update)?;
        ensure_unique_ids(family.children.iter().map(|c| c.id.as_str()), "child")?;

        self.store.update_family(id, family).await?;
        info!(employee_id = %id, by = %caller.username, "Family record updated");
        Ok(())
    }

    async fn update_education(
        &self,
        caller: &User,
        id: &EmployeeId,
        education: Vec<Education>,
    ) -> AppResult<()> {
        Self::authorize_record(caller, id, Operation::Update)?;
        ensure_unique_ids(education.iter().map(|e| e.id.as_str()), "education")?;

        let entries = education.len();
        self.store.update_education(id, education).await?;
        info!(employee_id = %id, by = %caller.username, entries, "Education history updated");
        Ok(())
    }

    async fn delete_employee(&self, caller: &User, id: &EmployeeId) -> AppResult<bool> {
        Self::authorize_record(caller, id, Operation::Delete)?;
        let removed = self.store.delete_employee(id).await?;
        info!(employee_id = %id, by = %caller.username, removed, "Employee deleted");
        Ok(removed)
    }

    async fn add_employee(
        &self,
        caller: &User,
        data: NewEmployee,
        credentials: Option<AccountCredentials>,
    ) -> AppResult<Employee> {
        authorize(Some(caller), Resource::EmployeeDirectory, Operation::Create)?;
        data.validate()?;

        let account = match credentials.filter(AccountCredentials::is_complete) {
            Some(credentials) => Some(NewAccount {
                username: credentials.username,
                password: Password::new(&credentials.password)?,
                role: Role::User,
                employee_id: None,
            }),
            None => None,
        };
        let with_account = account.is_some();

        let employee = self.store.add_employee(data, account).await?;
        info!(
            employee_id = %employee.id,
            by = %caller.username,
            with_account,
            "Employee created"
        );
        Ok(employee)
    }

    async fn search_own(&self, caller: &User, term: &str) -> AppResult<Option<Employee>> {
        authorize(Some(caller), Resource::OwnRecordSearch, Operation::Read)?;

        let Some(own_id) = caller.employee_id.as_ref() else {
            return Ok(None);
        };
        if term.trim().is_empty() {
            return Ok(None);
        }

        let own = self.store.find_employee_by_id(own_id).await?;
        Ok(own.filter(|employee| matches_own_record(employee, term)))
    }
}

fn ensure_unique_ids<'a>(ids: impl Iterator<Item = &'a str>, kind: &str) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(AppError::validation(format!("Every {} entry needs an id", kind)));
        }
        if !seen.insert(id) {
            return Err(AppError::validation(format!(
                "Duplicate {} entry id '{}'",
                kind, id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRecordStore;
    use domain::{AccountId, Child};

    fn session(role: Role, employee: Option<&str>) -> User {
        User {
            id: AccountId::new("user-test"),
            username: "tester".to_string(),
            role,
            employee_id: employee.map(EmployeeId::new),
        }
    }

    fn stored(id: &str, name: &str) -> Employee {
        Employee::blank(EmployeeId::new(id), name)
    }

    #[tokio::test]
    async fn test_user_cannot_read_foreign_record() {
        // No expectations: the store must not be consulted at all.
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::User, Some("pegawai-2"));

        let result = service
            .get_employee(&caller, &EmployeeId::new("pegawai-1"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_reads_own_record() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_employee_by_id()
            .times(1)
            .returning(|id| Ok(Some(stored(id.as_str(), "Rina Wijaya"))));

        let service = EmployeeManager::new(Arc::new(store));
        let caller = session(Role::User, Some("pegawai-2"));

        let employee = service
            .get_employee(&caller, &EmployeeId::new("pegawai-2"))
            .await
            .unwrap();

        assert_eq!(employee.name, "Rina Wijaya");
    }

    #[tokio::test]
    async fn test_user_cannot_update_foreign_family() {
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::User, Some("pegawai-2"));

        let result = service
            .update_family(&caller, &EmployeeId::new("pegawai-1"), Family::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_cannot_list_directory() {
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::User, Some("pegawai-2"));

        let result = service
            .list_employees(&caller, &EmployeeFilter::default())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_without_changes_skips_store_write() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_employee_by_id()
            .returning(|id| Ok(Some(stored(id.as_str(), "Budi Santoso"))));
        store.expect_update_employee().never();

        let service = EmployeeManager::new(Arc::new(store));
        let caller = session(Role::Admin, None);

        let result = service
            .update_employee(&caller, stored("pegawai-1", "Budi Santoso"))
            .await
            .unwrap();

        assert_eq!(result.name, "Budi Santoso");
    }

    #[tokio::test]
    async fn test_update_family_rejects_duplicate_child_ids() {
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::Admin, None);
        let child = Child::new("Ahmad");
        let family = Family {
            children: vec![child.clone(), child],
            ..Family::default()
        };

        let result = service
            .update_family(&caller, &EmployeeId::new("pegawai-1"), family)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_employee_rejects_duplicate_child_ids() {
        let mut store = MockRecordStore::new();
        store.expect_find_employee_by_id().never();
        store.expect_update_employee().never();

        let service = EmployeeManager::new(Arc::new(store));
        let caller = session(Role::User, Some("pegawai-1"));
        let mut employee = stored("pegawai-1", "Budi Santoso");
        let child = Child::new("Adi");
        employee.family.children = vec![child.clone(), child];

        let result = service.update_employee(&caller, employee).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_employee_requires_name_and_nik() {
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::Admin, None);
        let data = NewEmployee {
            name: "Dedi".to_string(),
            ..NewEmployee::default()
        };

        let result = service.add_employee(&caller, data, None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_employee_ignores_incomplete_credentials() {
        let mut store = MockRecordStore::new();
        store.expect_find_account_by_username().never();
        store
            .expect_add_employee()
            .withf(|_, account| account.is_none())
            .returning(|data, _| Ok(Employee::from_new(EmployeeId::new("pegawai-9"), data)));

        let service = EmployeeManager::new(Arc::new(store));
        let caller = session(Role::Admin, None);
        let data = NewEmployee {
            name: "Dedi".to_string(),
            national_id: "123".to_string(),
            ..NewEmployee::default()
        };
        let credentials = AccountCredentials {
            username: "dedi".to_string(),
            password: String::new(),
        };

        let employee = service
            .add_employee(&caller, data, Some(credentials))
            .await
            .unwrap();

        assert_eq!(employee.id.as_str(), "pegawai-9");
    }

    #[tokio::test]
    async fn test_search_own_never_reveals_other_records() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_employee_by_id()
            .withf(|id| id.as_str() == "pegawai-2")
            .returning(|id| Ok(Some(stored(id.as_str(), "Rina Wijaya"))));

        let service = EmployeeManager::new(Arc::new(store));
        let caller = session(Role::User, Some("pegawai-2"));

        assert!(service.search_own(&caller, "rina").await.unwrap().is_some());
        assert!(service.search_own(&caller, "budi").await.unwrap().is_none());
        assert!(service.search_own(&caller, "  ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_cannot_use_own_search() {
        let service = EmployeeManager::new(Arc::new(MockRecordStore::new()));
        let caller = session(Role::Admin, None);

        let result = service.search_own(&caller, "budi").await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
