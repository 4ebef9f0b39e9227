//! Use-case tests for the employee, account and report services.

use std::sync::Arc;

use common::AppError;
use domain::{AccountId, EmployeeFilter, EmployeeId, NewEmployee, Role, User};
use record_service_lib::latency::LatencyPolicy;
use record_service_lib::repository::{InMemoryStore, RecordStore};
use record_service_lib::service::{
    AccountCredentials, AccountManager, AccountService, CreateAccount, EmployeeManager,
    EmployeeService, ExportFormat, ReportManager, ReportService,
};

struct Services {
    store: Arc<dyn RecordStore>,
    employees: EmployeeManager,
    accounts: AccountManager,
    reports: ReportManager,
}

fn services() -> Services {
    services_with(LatencyPolicy::NONE)
}

fn services_with(latency: LatencyPolicy) -> Services {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::seeded(latency).unwrap());
    Services {
        employees: EmployeeManager::new(store.clone()),
        accounts: AccountManager::new(store.clone()),
        reports: ReportManager::new(store.clone()),
        store,
    }
}

fn admin() -> User {
    User {
        id: AccountId::new("user-admin"),
        username: "admin".to_string(),
        role: Role::Admin,
        employee_id: None,
    }
}

fn rina() -> User {
    User {
        id: AccountId::new("user-2"),
        username: "rina".to_string(),
        role: Role::User,
        employee_id: Some(EmployeeId::new("pegawai-2")),
    }
}

#[tokio::test]
async fn test_admin_delete_employee_removes_linked_account() {
    let s = services();
    let id = EmployeeId::new("pegawai-1");

    let removed = s.employees.delete_employee(&admin(), &id).await.unwrap();

    assert!(removed);
    let accounts = s.accounts.list_accounts(&admin()).await.unwrap();
    assert!(!accounts.iter().any(|a| a.is_linked_to(&id)));
}

#[tokio::test]
async fn test_admin_add_employee_with_account() {
    let s = services();
    let data = NewEmployee {
        name: "Dedi".to_string(),
        national_id: "123".to_string(),
        ..NewEmployee::default()
    };
    let credentials = AccountCredentials {
        username: "dedi".to_string(),
        password: "dedi".to_string(),
    };

    let employee = s
        .employees
        .add_employee(&admin(), data, Some(credentials))
        .await
        .unwrap();

    let accounts = s.accounts.list_accounts(&admin()).await.unwrap();
    let linked = accounts.iter().find(|a| a.is_linked_to(&employee.id)).unwrap();
    assert_eq!(linked.role, Role::User);
    assert_eq!(linked.username, "dedi");

    let listed = s
        .employees
        .list_employees(&admin(), &EmployeeFilter::default())
        .await
        .unwrap();
    assert_eq!(listed[0].id, employee.id);
}

#[tokio::test]
async fn test_add_employee_with_taken_username_writes_nothing() {
    let s = services();
    let data = NewEmployee {
        name: "Dedi".to_string(),
        national_id: "123".to_string(),
        ..NewEmployee::default()
    };
    let credentials = AccountCredentials {
        username: "budi".to_string(),
        password: "dedi".to_string(),
    };

    let result = s.employees.add_employee(&admin(), data, Some(credentials)).await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));
    assert_eq!(s.store.list_employees().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_user_updates_own_record_only() {
    let s = services();
    let own = EmployeeId::new("pegawai-2");
    let mut record = s.employees.get_employee(&rina(), &own).await.unwrap();
    record.phone = "089999999999".to_string();

    let updated = s.employees.update_employee(&rina(), record).await.unwrap();
    assert_eq!(updated.phone, "089999999999");

    let mut foreign = s
        .store
        .find_employee_by_id(&EmployeeId::new("pegawai-1"))
        .await
        .unwrap()
        .unwrap();
    foreign.phone = "080000000000".to_string();
    let result = s.employees.update_employee(&rina(), foreign).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    let untouched = s
        .store
        .find_employee_by_id(&EmployeeId::new("pegawai-1"))
        .await
        .unwrap()
        .unwrap();
    assert_ne!(untouched.phone, "080000000000");
}

#[tokio::test]
async fn test_update_employee_rejects_duplicate_education_ids() {
    let s = services();
    let budi = User {
        id: AccountId::new("user-1"),
        username: "budi".to_string(),
        role: Role::User,
        employee_id: Some(EmployeeId::new("pegawai-1")),
    };
    let own = EmployeeId::new("pegawai-1");
    let mut record = s.employees.get_employee(&budi, &own).await.unwrap();
    let repeated = record.education[0].clone();
    record.education.push(repeated);

    let result = s.employees.update_employee(&budi, record).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    let stored = s.store.find_employee_by_id(&own).await.unwrap().unwrap();
    let ids: Vec<&str> = stored.education.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["pend-1", "pend-2"]);
}

#[tokio::test]
async fn test_directory_filter_and_facets() {
    let s = services();

    let filter = EmployeeFilter {
        term: Some("3201234567890001".to_string()),
        ..EmployeeFilter::default()
    };
    let found = s.employees.list_employees(&admin(), &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_str(), "pegawai-1");

    let facets = s.employees.directory_facets(&admin()).await.unwrap();
    assert_eq!(facets.positions.len(), 2);
    assert_eq!(facets.grades.len(), 2);
}

#[tokio::test]
async fn test_create_account_links_unassigned_employee() {
    let s = services();
    let employee = s
        .employees
        .add_employee(
            &admin(),
            NewEmployee {
                name: "Eka".to_string(),
                national_id: "456".to_string(),
                ..NewEmployee::default()
            },
            None,
        )
        .await
        .unwrap();

    let unassigned = s.accounts.unassigned_employees(&admin()).await.unwrap();
    assert_eq!(unassigned.len(), 1);

    let account = s
        .accounts
        .create_account(
            &admin(),
            CreateAccount {
                username: "eka".to_string(),
                password: "eka123".to_string(),
                role: Role::User,
                employee_id: Some(employee.id.clone()),
            },
        )
        .await
        .unwrap();

    assert!(account.is_linked_to(&employee.id));
    assert!(s.accounts.unassigned_employees(&admin()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_account_rejects_linked_or_missing_employee() {
    let s = services();
    let request = |username: &str, employee: &str| CreateAccount {
        username: username.to_string(),
        password: "secret".to_string(),
        role: Role::User,
        employee_id: Some(EmployeeId::new(employee)),
    };

    let linked = s
        .accounts
        .create_account(&admin(), request("budi2", "pegawai-1"))
        .await;
    assert!(matches!(linked, Err(AppError::Conflict(_))));

    let missing = s
        .accounts
        .create_account(&admin(), request("ghost", "pegawai-404"))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let taken = s
        .accounts
        .create_account(&admin(), request("rina", "pegawai-404"))
        .await;
    assert!(matches!(taken, Err(AppError::UsernameTaken)));
}

#[tokio::test]
async fn test_concurrent_account_creation_links_employee_once() {
    let s = services_with(LatencyPolicy::from_millis(5));
    let caller = admin();
    let employee = s
        .employees
        .add_employee(
            &caller,
            NewEmployee {
                name: "Eka".to_string(),
                national_id: "456".to_string(),
                ..NewEmployee::default()
            },
            None,
        )
        .await
        .unwrap();
    let request = |username: &str| CreateAccount {
        username: username.to_string(),
        password: "secret".to_string(),
        role: Role::User,
        employee_id: Some(employee.id.clone()),
    };

    let (first, second) = tokio::join!(
        s.accounts.create_account(&caller, request("eka")),
        s.accounts.create_account(&caller, request("eka2")),
    );

    assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
    assert!(matches!(
        first.err().or(second.err()),
        Some(AppError::Conflict(_))
    ));
    let accounts = s.store.list_accounts().await.unwrap();
    assert_eq!(accounts.iter().filter(|a| a.is_linked_to(&employee.id)).count(), 1);
}

#[tokio::test]
async fn test_concurrent_account_creation_keeps_usernames_unique() {
    let s = services_with(LatencyPolicy::from_millis(5));
    let caller = admin();
    let request = || CreateAccount {
        username: "dup".to_string(),
        password: "secret".to_string(),
        role: Role::Admin,
        employee_id: None,
    };

    let (first, second) = tokio::join!(
        s.accounts.create_account(&caller, request()),
        s.accounts.create_account(&caller, request()),
    );

    assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
    assert!(matches!(
        first.err().or(second.err()),
        Some(AppError::UsernameTaken)
    ));
    let accounts = s.store.list_accounts().await.unwrap();
    assert_eq!(accounts.iter().filter(|a| a.username == "dup").count(), 1);
}

#[tokio::test]
async fn test_concurrent_add_employee_keeps_usernames_unique() {
    let s = services_with(LatencyPolicy::from_millis(5));
    let caller = admin();
    let data = |name: &str| NewEmployee {
        name: name.to_string(),
        national_id: "123".to_string(),
        ..NewEmployee::default()
    };
    let credentials = || AccountCredentials {
        username: "dedi".to_string(),
        password: "dedi".to_string(),
    };

    let (first, second) = tokio::join!(
        s.employees.add_employee(&caller, data("Dedi"), Some(credentials())),
        s.employees.add_employee(&caller, data("Dedi Kedua"), Some(credentials())),
    );

    assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
    assert!(matches!(
        first.err().or(second.err()),
        Some(AppError::UsernameTaken)
    ));
    assert_eq!(s.store.list_employees().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let s = services();

    let result = s
        .accounts
        .delete_account(&admin(), &AccountId::new("user-admin"))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(s.store.list_accounts().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_user_cannot_manage_accounts_or_reports() {
    let s = services();

    assert!(matches!(
        s.accounts.list_accounts(&rina()).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        s.reports.dashboard(&rina()).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        s.reports.export(&rina(), ExportFormat::Pdf).await,
        Err(AppError::Forbidden)
    ));
}

#[tokio::test]
async fn test_dashboard_counts_seed_data() {
    let s = services();

    let stats = s.reports.dashboard(&admin()).await.unwrap();

    assert_eq!(stats.employee_count, 2);
    assert_eq!(stats.account_count, 3);
    assert_eq!(stats.position_count, 2);
    assert_eq!(stats.latest_employees.len(), 2);
    assert_eq!(stats.latest_employees[0].id.as_str(), "pegawai-1");
}

#[tokio::test]
async fn test_export_reports_record_count() {
    let s = services();

    let receipt = s.reports.export(&admin(), ExportFormat::Excel).await.unwrap();

    assert_eq!(receipt.format, ExportFormat::Excel);
    assert_eq!(receipt.record_count, 2);
}
