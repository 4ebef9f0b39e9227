//! Account service - administrator management of login accounts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    authorize, AccountId, Employee, EmployeeId, NewAccount, Operation, Password, Resource, Role,
    User, UserAccount,
};

use crate::repository::RecordStore;

/// Administrator request for a new account.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAccount {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    /// Employee to link; must not be linked to another account yet
    #[serde(rename = "pegawaiId", default)]
    pub employee_id: Option<EmployeeId>,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// List all accounts
    async fn list_accounts(&self, caller: &User) -> AppResult<Vec<UserAccount>>;

    /// Create an account, optionally linked to an unassigned employee
    async fn create_account(&self, caller: &User, request: CreateAccount)
        -> AppResult<UserAccount>;

    /// Replace an account's password
    async fn reset_password(&self, caller: &User, id: &AccountId, new_password: &str)
        -> AppResult<()>;

    /// Delete an account; the linked employee stays
    async fn delete_account(&self, caller: &User, id: &AccountId) -> AppResult<bool>;

    /// Employees available for linking
    async fn unassigned_employees(&self, caller: &User) -> AppResult<Vec<Employee>>;
}

/// Concrete implementation of AccountService using the record store.
pub struct AccountManager {
    store: Arc<dyn RecordStore>,
}

impl AccountManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn list_accounts(&self, caller: &User) -> AppResult<Vec<UserAccount>> {
        authorize(Some(caller), Resource::Accounts, Operation::Read)?;
        self.store.list_accounts().await
    }

    async fn create_account(
        &self,
        caller: &User,
        request: CreateAccount,
    ) -> AppResult<UserAccount> {
        authorize(Some(caller), Resource::Accounts, Operation::Create)?;

        if request.username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if request.password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let account = self
            .store
            .add_account_checked(NewAccount {
                username: request.username,
                password: Password::new(&request.password)?,
                role: request.role,
                employee_id: request.employee_id,
            })
            .await?;

        info!(
            account_id = %account.id,
            username = %account.username,
            role = %account.role,
            by = %caller.username,
            "Account created"
        );
        Ok(account)
    }

    async fn reset_password(
        &self,
        caller: &User,
        id: &AccountId,
        new_password: &str,
    ) -> AppResult<()> {
        authorize(Some(caller), Resource::Accounts, Operation::Update)?;
        let password = Password::new(new_password)?;
        self.store.reset_password(id, password).await?;
        info!(account_id = %id, by = %caller.username, "Password reset");
        Ok(())
    }

    async fn delete_account(&self, caller: &User, id: &AccountId) -> AppResult<bool> {
        authorize(Some(caller), Resource::Accounts, Operation::Delete)?;
        if &caller.id == id {
            return Err(AppError::BadRequest(
                "Cannot delete your own account".to_string(),
            ));
        }

        let removed = self.store.delete_account(id).await?;
        info!(account_id = %id, by = %caller.username, removed, "Account deleted");
        Ok(removed)
    }

    async fn unassigned_employees(&self, caller: &User) -> AppResult<Vec<Employee>> {
        authorize(Some(caller), Resource::Accounts, Operation::Read)?;
        self.store.unassigned_employees().await
    }
}
